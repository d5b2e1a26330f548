//! Shared fixtures for integration tests.

use std::path::PathBuf;

use chrono::NaiveDate;
use evroute_lib::{load_network_file, Battery, Network, Vehicle};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The Doha network as stored in the JSON fixture.
#[allow(dead_code)]
pub fn doha_network() -> Network {
    load_network_file(&fixtures_dir().join("doha_network.json")).expect("doha fixture loads")
}

/// A network with two disconnected road systems and an isolated location.
#[allow(dead_code)]
pub fn split_network() -> Network {
    load_network_file(&fixtures_dir().join("split_network.json")).expect("split fixture loads")
}

/// Vehicle parked at `location` with `level` kWh in a 75 kWh battery.
#[allow(dead_code)]
pub fn vehicle_at(location: &str, level: f64) -> Vehicle {
    Vehicle::new(location, Battery::new(level, 75.0).expect("valid battery"))
}

#[allow(dead_code)]
pub fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 4, day).expect("valid date")
}
