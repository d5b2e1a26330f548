use serde::Serialize;
use tracing::info;

use crate::energy::Battery;
use crate::ledger::TripLedger;

/// Location the car starts from when nothing else is configured.
pub const DEFAULT_START_LOCATION: &str = "The Pearl";

/// Top speed of the simulated car in km/h.
pub const DEFAULT_TOP_SPEED_KMH: u32 = 145;

/// Mutable state of one self-driving car.
///
/// The vehicle owns its battery and trip history; planners borrow it
/// mutably for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    location: String,
    top_speed_kmh: u32,
    pub battery: Battery,
    pub trips: TripLedger,
}

impl Vehicle {
    pub fn new(location: impl Into<String>, battery: Battery) -> Self {
        Self {
            location: location.into(),
            top_speed_kmh: DEFAULT_TOP_SPEED_KMH,
            battery,
            trips: TripLedger::new(),
        }
    }

    pub fn with_top_speed(mut self, top_speed_kmh: u32) -> Self {
        self.top_speed_kmh = top_speed_kmh;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn top_speed_kmh(&self) -> u32 {
        self.top_speed_kmh
    }

    /// Move the car to `destination` once a route has been driven.
    pub fn drive_to(&mut self, destination: impl Into<String>) {
        let destination = destination.into();
        info!(from = %self.location, to = %destination, "vehicle arrived");
        self.location = destination;
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(DEFAULT_START_LOCATION, Battery::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vehicle_starts_at_the_pearl() {
        let vehicle = Vehicle::default();
        assert_eq!(vehicle.location(), "The Pearl");
        assert_eq!(vehicle.top_speed_kmh(), 145);
        assert_eq!(vehicle.battery.level(), 75.0);
        assert!(vehicle.trips.is_empty());
    }

    #[test]
    fn drive_to_updates_location() {
        let mut vehicle = Vehicle::default().with_top_speed(120);
        vehicle.drive_to("Mall of Qatar");
        assert_eq!(vehicle.location(), "Mall of Qatar");
        assert_eq!(vehicle.top_speed_kmh(), 120);
    }
}
