//! Electric vehicle route planner CLI library.
//!
//! This crate wires the routing library into one-shot subcommands and the
//! interactive main menu, and provides the output formatting they share.

pub mod commands;
pub mod output;
pub mod session;
