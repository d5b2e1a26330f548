//! Trip planning: shortest path routing gated by the energy check.
//!
//! This module provides:
//! - [`TripPlanner`] - orchestrates routing, energy approval and bookkeeping
//! - [`TripOutcome`] - result of a trip request
//! - [`ChargingAdvice`] - result of looking for the nearest charging station
//!
//! The planner holds no mutable state of its own. Battery and trip history
//! live on the [`Vehicle`] passed into each call, so one planner can serve
//! any number of vehicles as long as each request has exclusive access to
//! its vehicle.
//!
//! # Example
//!
//! ```
//! use evroute_lib::{Network, TripPlanner, Vehicle};
//!
//! let network = Network::builtin();
//! let planner = TripPlanner::new(&network);
//! let mut vehicle = Vehicle::default();
//!
//! let outcome = planner.plan_trip(&mut vehicle, "The Pearl", "Aspire").unwrap();
//! assert!(outcome.is_approved());
//! assert_eq!(outcome.distance_km(), Some(26.0));
//! ```

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::energy::{EnergyDecision, EnergyPolicy};
use crate::error::Result;
use crate::ledger::Trip;
use crate::network::Network;
use crate::path::{shortest_distances, shortest_path, ShortestPath};
use crate::vehicle::Vehicle;

/// Result of a trip request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TripOutcome {
    /// Origin and destination are not connected.
    Unreachable { origin: String, destination: String },
    /// Route found and energy approved; the trip has been recorded.
    Approved { trip: Trip, path: ShortestPath },
    /// Route found but the battery cannot cover it; nothing changed.
    InsufficientEnergy {
        path: ShortestPath,
        required_kwh: f64,
        available_kwh: f64,
    },
}

impl TripOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, TripOutcome::Approved { .. })
    }

    pub fn is_reachable(&self) -> bool {
        !matches!(self, TripOutcome::Unreachable { .. })
    }

    /// Route distance, `None` when unreachable.
    pub fn distance_km(&self) -> Option<f64> {
        self.path().map(|path| path.distance_km)
    }

    pub fn path(&self) -> Option<&ShortestPath> {
        match self {
            TripOutcome::Unreachable { .. } => None,
            TripOutcome::Approved { path, .. } | TripOutcome::InsufficientEnergy { path, .. } => {
                Some(path)
            }
        }
    }

    /// Recorded trip, present only when approved.
    pub fn trip(&self) -> Option<&Trip> {
        match self {
            TripOutcome::Approved { trip, .. } => Some(trip),
            _ => None,
        }
    }
}

/// Advice returned when the driver asks where to charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "advice", rename_all = "snake_case")]
pub enum ChargingAdvice {
    /// The vehicle already stands at a charging station.
    ChargeInPlace { location: String },
    /// The vehicle drove to the nearest station and was fully recharged.
    Diverted {
        station: String,
        distance_km: f64,
        trip: Trip,
    },
    /// No station can be reached on the remaining charge.
    NoStationReachable,
}

impl fmt::Display for ChargingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargingAdvice::ChargeInPlace { .. } => f.write_str(
                "You are next to a charging station. Charge your car before travelling to your desired location!",
            ),
            ChargingAdvice::Diverted {
                station,
                distance_km,
                ..
            } => write!(
                f,
                "Your car needs to be charged and will be travelling to {station}, which is {distance_km} km away from here."
            ),
            ChargingAdvice::NoStationReachable => f.write_str(
                "Your car needs to be charged, but no station is reachable at the moment. Please contact roadside assistance.",
            ),
        }
    }
}

/// Plans trips over a network using an energy policy.
#[derive(Debug, Clone)]
pub struct TripPlanner<'a> {
    network: &'a Network,
    policy: EnergyPolicy,
}

impl<'a> TripPlanner<'a> {
    /// Planner using the default consumption rate and reserve.
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            policy: EnergyPolicy::default(),
        }
    }

    pub fn with_policy(network: &'a Network, policy: EnergyPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { network, policy })
    }

    pub fn network(&self) -> &Network {
        self.network
    }

    pub fn policy(&self) -> &EnergyPolicy {
        &self.policy
    }

    /// Plan a trip dated today in local time.
    pub fn plan_trip(
        &self,
        vehicle: &mut Vehicle,
        origin: &str,
        destination: &str,
    ) -> Result<TripOutcome> {
        self.plan_trip_on(vehicle, origin, destination, today())
    }

    /// Route `origin -> destination`, check the battery and, if approved,
    /// debit it, record the trip on `date` and move the vehicle.
    pub fn plan_trip_on(
        &self,
        vehicle: &mut Vehicle,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<TripOutcome> {
        let graph = self.network.graph();
        let Some(path) = shortest_path(graph, origin, destination)? else {
            warn!(origin, destination, "cannot reach destination");
            return Ok(TripOutcome::Unreachable {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        };

        Ok(self.drive(vehicle, path, date))
    }

    /// Look for a charging station, dated today in local time.
    pub fn suggest_charging(&self, vehicle: &mut Vehicle, origin: &str) -> Result<ChargingAdvice> {
        self.suggest_charging_on(vehicle, origin, today())
    }

    /// Send the vehicle to the nearest reachable charging station.
    ///
    /// When `origin` is itself a station no routing happens. Otherwise the
    /// closest station is chosen, ties going to the station listed first.
    /// If the energy check passes, the trip is recorded, the vehicle moves
    /// to the station and the battery is recharged to full.
    pub fn suggest_charging_on(
        &self,
        vehicle: &mut Vehicle,
        origin: &str,
        date: NaiveDate,
    ) -> Result<ChargingAdvice> {
        let graph = self.network.graph();
        let origin = graph.resolve(origin)?;
        let stations = self.network.charging_stations();

        if stations.contains(origin) {
            return Ok(ChargingAdvice::ChargeInPlace {
                location: origin.to_string(),
            });
        }

        let mut nearest: Option<ShortestPath> = None;
        for station in stations.iter() {
            let table = shortest_distances(graph, origin)?;
            let Some(candidate) = table.path_to(station) else {
                continue;
            };
            let closer = nearest
                .as_ref()
                .map_or(true, |best| candidate.distance_km < best.distance_km);
            if closer {
                nearest = Some(candidate);
            }
        }

        let Some(path) = nearest else {
            warn!(origin, "no charging station is connected to the current location");
            return Ok(ChargingAdvice::NoStationReachable);
        };

        match self.drive(vehicle, path, date) {
            TripOutcome::Approved { trip, path } => {
                vehicle.battery.recharge();
                let station = path.destination().to_string();
                info!(
                    station = %station,
                    distance_km = path.distance_km,
                    "diverted to charging station"
                );
                Ok(ChargingAdvice::Diverted {
                    station,
                    distance_km: path.distance_km,
                    trip,
                })
            }
            _ => Ok(ChargingAdvice::NoStationReachable),
        }
    }

    fn drive(&self, vehicle: &mut Vehicle, path: ShortestPath, date: NaiveDate) -> TripOutcome {
        match self.policy.approve(&mut vehicle.battery, path.distance_km) {
            EnergyDecision::Approved { .. } => {
                let trip = vehicle.trips.record(path.distance_km, date).clone();
                info!(
                    trip = %trip.name,
                    distance_km = trip.distance_km,
                    destination = path.destination(),
                    "trip recorded"
                );
                vehicle.drive_to(path.destination());
                TripOutcome::Approved { trip, path }
            }
            EnergyDecision::InsufficientEnergy {
                required_kwh,
                available_kwh,
            } => TripOutcome::InsufficientEnergy {
                path,
                required_kwh,
                available_kwh,
            },
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
