pub mod charge;
pub mod locations;
pub mod menu;
pub mod route;
