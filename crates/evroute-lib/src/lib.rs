//! Electric vehicle route planning library.
//!
//! This crate models a small self-driving electric car: a static road
//! network with charging stations, a shortest-path router, the energy check
//! that approves or rejects trips, the trip history and part maintenance.
//! Higher-level consumers (the CLI and its interactive menu) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod energy;
pub mod error;
pub mod graph;
pub mod ledger;
pub mod maintenance;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod vehicle;

pub use config::{load_network, load_network_file, parse_network, NetworkSource, NETWORK_ENV_VAR};
pub use energy::{Battery, EnergyDecision, EnergyPolicy};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder};
pub use ledger::{Trip, TripLedger};
pub use maintenance::{MaintenanceMonitor, MaintenanceReport, Part, ServiceDue};
pub use network::{ChargingStations, Network, NetworkSpec, Road};
pub use output::{LedgerSummary, TripStatus, TripSummary};
pub use path::{shortest_distances, shortest_path, DistanceTable, ShortestPath};
pub use routing::{ChargingAdvice, TripOutcome, TripPlanner};
pub use vehicle::Vehicle;
