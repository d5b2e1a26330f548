//! Battery state and the energy feasibility check that gates every trip.
//!
//! A trip is approved only when the energy it needs is strictly below the
//! current charge and the charge left afterwards stays at or above the
//! reserve floor. Approval debits the battery; rejection leaves it as it was.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Total capacity of the vehicle battery in kWh.
pub const BATTERY_CAPACITY_KWH: f64 = 75.0;

/// Energy consumed per kilometre driven, in kWh.
pub const ENERGY_PER_KM_KWH: f64 = 0.16;

/// Charge that must remain after any approved trip, in kWh.
pub const MINIMUM_RESERVE_KWH: f64 = 7.5;

/// Traction battery of the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Battery {
    level_kwh: f64,
    capacity_kwh: f64,
}

impl Battery {
    /// Create a battery holding `level_kwh` out of `capacity_kwh`.
    ///
    /// The level is not clamped to the capacity; a freshly conditioned pack
    /// may briefly report more than its nominal rating.
    pub fn new(level_kwh: f64, capacity_kwh: f64) -> Result<Self> {
        validate_energy("capacity", capacity_kwh)?;
        validate_energy("level", level_kwh)?;
        Ok(Self {
            level_kwh,
            capacity_kwh,
        })
    }

    /// A fully charged battery of the given capacity.
    pub fn full(capacity_kwh: f64) -> Result<Self> {
        Self::new(capacity_kwh, capacity_kwh)
    }

    pub fn level(&self) -> f64 {
        self.level_kwh
    }

    pub fn capacity(&self) -> f64 {
        self.capacity_kwh
    }

    /// Charge as a share of capacity, in percent.
    pub fn percentage(&self) -> f64 {
        if self.capacity_kwh == 0.0 {
            0.0
        } else {
            self.level_kwh / self.capacity_kwh * 100.0
        }
    }

    pub fn set_level(&mut self, level_kwh: f64) -> Result<()> {
        validate_energy("level", level_kwh)?;
        self.level_kwh = level_kwh;
        Ok(())
    }

    /// Charge back to full capacity.
    pub fn recharge(&mut self) {
        self.level_kwh = self.capacity_kwh;
    }

    fn debit(&mut self, energy_kwh: f64) {
        self.level_kwh -= energy_kwh;
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self {
            level_kwh: BATTERY_CAPACITY_KWH,
            capacity_kwh: BATTERY_CAPACITY_KWH,
        }
    }
}

/// Outcome of an energy feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnergyDecision {
    /// Trip approved and `required_kwh` debited.
    Approved { required_kwh: f64, remaining_kwh: f64 },
    /// Trip rejected; the battery was left untouched.
    InsufficientEnergy {
        required_kwh: f64,
        available_kwh: f64,
    },
}

impl EnergyDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, EnergyDecision::Approved { .. })
    }

    pub fn required_kwh(&self) -> f64 {
        match *self {
            EnergyDecision::Approved { required_kwh, .. }
            | EnergyDecision::InsufficientEnergy { required_kwh, .. } => required_kwh,
        }
    }
}

/// Consumption rate and reserve floor used to approve trips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyPolicy {
    pub energy_per_km: f64,
    pub minimum_reserve: f64,
}

impl Default for EnergyPolicy {
    fn default() -> Self {
        Self {
            energy_per_km: ENERGY_PER_KM_KWH,
            minimum_reserve: MINIMUM_RESERVE_KWH,
        }
    }
}

impl EnergyPolicy {
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("energy_per_km", self.energy_per_km),
            ("minimum_reserve", self.minimum_reserve),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidEnergyPolicy {
                    message: format!("{label} must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Energy needed to drive `distance_km`.
    pub fn required_energy(&self, distance_km: f64) -> f64 {
        distance_km * self.energy_per_km
    }

    /// Decide whether `distance_km` can be driven without touching the
    /// battery.
    ///
    /// The first condition is strict: a trip needing exactly the current
    /// charge is rejected even when the reserve is zero.
    pub fn assess(&self, battery: &Battery, distance_km: f64) -> EnergyDecision {
        let required_kwh = self.required_energy(distance_km);
        let available_kwh = battery.level();

        if required_kwh < available_kwh && available_kwh - required_kwh >= self.minimum_reserve {
            EnergyDecision::Approved {
                required_kwh,
                remaining_kwh: available_kwh - required_kwh,
            }
        } else {
            EnergyDecision::InsufficientEnergy {
                required_kwh,
                available_kwh,
            }
        }
    }

    /// Check a trip and, when approved, debit the energy it needs.
    pub fn approve(&self, battery: &mut Battery, distance_km: f64) -> EnergyDecision {
        let decision = self.assess(battery, distance_km);
        match decision {
            EnergyDecision::Approved {
                required_kwh,
                remaining_kwh,
            } => {
                battery.debit(required_kwh);
                debug!(distance_km, required_kwh, remaining_kwh, "trip energy approved");
            }
            EnergyDecision::InsufficientEnergy {
                required_kwh,
                available_kwh,
            } => {
                warn!(
                    distance_km,
                    required_kwh,
                    available_kwh,
                    "the car needs to be charged to complete this trip"
                );
            }
        }
        decision
    }
}

fn validate_energy(label: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBattery {
            message: format!("{label} must be finite and non-negative, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn short_trip_is_approved_and_debited() {
        let policy = EnergyPolicy::default();
        let mut battery = Battery::new(82.5, BATTERY_CAPACITY_KWH).unwrap();

        let decision = policy.approve(&mut battery, 20.0);
        assert!(decision.is_approved());
        assert!(close(decision.required_kwh(), 3.2));
        assert!(close(battery.level(), 79.3));
    }

    #[test]
    fn long_trip_is_rejected_without_debit() {
        let policy = EnergyPolicy::default();
        let mut battery = Battery::new(20.0, BATTERY_CAPACITY_KWH).unwrap();

        let decision = policy.approve(&mut battery, 1000.0);
        match decision {
            EnergyDecision::InsufficientEnergy {
                required_kwh,
                available_kwh,
            } => {
                assert!(close(required_kwh, 160.0));
                assert_eq!(available_kwh, 20.0);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(battery.level(), 20.0);
    }

    #[test]
    fn reserve_floor_is_enforced_when_charge_suffices() {
        // 50 km needs 8 kWh: below the 10 kWh charge but would leave 2 kWh.
        let policy = EnergyPolicy::default();
        let mut battery = Battery::new(10.0, BATTERY_CAPACITY_KWH).unwrap();

        assert!(!policy.approve(&mut battery, 50.0).is_approved());
        assert_eq!(battery.level(), 10.0);
    }

    #[test]
    fn landing_exactly_on_the_reserve_is_allowed() {
        let policy = EnergyPolicy {
            energy_per_km: 1.0,
            minimum_reserve: 5.0,
        };
        let mut battery = Battery::new(15.0, 20.0).unwrap();

        assert!(policy.approve(&mut battery, 10.0).is_approved());
        assert_eq!(battery.level(), 5.0);
    }

    #[test]
    fn requiring_the_whole_charge_is_rejected_even_without_reserve() {
        let policy = EnergyPolicy {
            energy_per_km: 1.0,
            minimum_reserve: 0.0,
        };
        let mut battery = Battery::new(10.0, 20.0).unwrap();

        assert!(!policy.approve(&mut battery, 10.0).is_approved());
        assert_eq!(battery.level(), 10.0);
    }

    #[test]
    fn recharge_restores_capacity() {
        let mut battery = Battery::new(12.0, BATTERY_CAPACITY_KWH).unwrap();
        battery.recharge();
        assert_eq!(battery.level(), BATTERY_CAPACITY_KWH);
        assert_eq!(battery.percentage(), 100.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Battery::new(-1.0, 75.0).is_err());
        assert!(Battery::new(10.0, f64::NAN).is_err());
        assert!(Battery::default().set_level(f64::INFINITY).is_err());

        let policy = EnergyPolicy {
            energy_per_km: -0.1,
            minimum_reserve: 7.5,
        };
        assert!(policy.validate().is_err());
        assert!(EnergyPolicy::default().validate().is_ok());
    }
}
