//! Part wear tracking and maintenance forecasts.
//!
//! Each part degrades from its maximum condition towards a minimum below
//! which it must be replaced. The forecast extrapolates the observed decline
//! per day of driving to estimate when each part reaches its minimum.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Alert shown while the car is in an emergency state.
pub const EMERGENCY_ALERT: &str =
    "ALERT: CAR REQUIRES MAINTENANCE IMMEDIATELY. CALL ROADSIDE ASSISTANCE!";

/// A monitored car component, conditions in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub name: String,
    pub condition: f64,
    pub max_condition: f64,
    pub min_condition: f64,
}

impl Part {
    pub fn new(
        name: impl Into<String>,
        condition: f64,
        max_condition: f64,
        min_condition: f64,
    ) -> Result<Self> {
        let name = name.into();
        for value in [condition, max_condition, min_condition] {
            if !value.is_finite() {
                return Err(Error::InvalidPart {
                    message: format!("{name}: conditions must be finite"),
                });
            }
        }
        if min_condition > max_condition {
            return Err(Error::InvalidPart {
                message: format!(
                    "{name}: minimum condition {min_condition} exceeds maximum {max_condition}"
                ),
            });
        }
        Ok(Self {
            name,
            condition,
            max_condition,
            min_condition,
        })
    }
}

/// When a single part is expected to need service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "days", rename_all = "snake_case")]
pub enum ServiceDue {
    Today,
    InDays(u64),
    /// No measurable wear yet, so no forecast is possible.
    Stable,
}

impl fmt::Display for ServiceDue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceDue::Today => f.write_str("today"),
            ServiceDue::InDays(days) => write!(f, "in {days} days"),
            ServiceDue::Stable => f.write_str("no wear recorded"),
        }
    }
}

/// Maintenance forecast for the whole car.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaintenanceReport {
    /// A part is at or below its minimum and must be replaced now.
    Replace { part: String, condition: f64 },
    /// Per-part forecasts in the order parts were added.
    Schedule { parts: Vec<(String, ServiceDue)> },
}

impl fmt::Display for MaintenanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceReport::Replace { part, condition } => write!(
                f,
                "Warning: The {part} of your car needs to be replaced immediately! Current condition: {condition}%."
            ),
            MaintenanceReport::Schedule { parts } => {
                for (index, (part, due)) in parts.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    match due {
                        ServiceDue::Stable => write!(f, "{part}: {due}")?,
                        _ => write!(f, "{part}: maintenance due {due}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Tracks part conditions and raises the emergency flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceMonitor {
    parts: Vec<Part>,
    emergency: bool,
}

impl MaintenanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monitor preloaded with the factory part list.
    pub fn with_default_parts() -> Self {
        let parts = [
            ("Heat Pump", 99.0, 100.0, 50.0),
            ("Front Motor", 100.0, 100.0, 60.0),
            ("Battery", 100.0, 100.0, 50.0),
            ("Rear Motor", 100.0, 100.0, 60.0),
            ("Charge Port", 100.0, 100.0, 30.0),
        ];
        Self {
            parts: parts
                .iter()
                .map(|&(name, condition, max, min)| Part {
                    name: name.to_string(),
                    condition,
                    max_condition: max,
                    min_condition: min,
                })
                .collect(),
            emergency: false,
        }
    }

    /// Add a part, replacing any part of the same name in place.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        condition: f64,
        max_condition: f64,
        min_condition: f64,
    ) -> Result<()> {
        let part = Part::new(name, condition, max_condition, min_condition)?;
        match self.parts.iter_mut().find(|p| p.name == part.name) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
        Ok(())
    }

    pub fn part(&self, name: &str) -> Result<&Part> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .ok_or_else(|| Error::UnknownPart {
                name: name.to_string(),
            })
    }

    pub fn condition(&self, name: &str) -> Result<f64> {
        self.part(name).map(|part| part.condition)
    }

    pub fn min_condition(&self, name: &str) -> Result<f64> {
        self.part(name).map(|part| part.min_condition)
    }

    pub fn max_condition(&self, name: &str) -> Result<f64> {
        self.part(name).map(|part| part.max_condition)
    }

    pub fn set_condition(&mut self, name: &str, condition: f64) -> Result<()> {
        if !condition.is_finite() {
            return Err(Error::InvalidPart {
                message: format!("{name}: conditions must be finite"),
            });
        }
        let part = self
            .parts
            .iter_mut()
            .find(|part| part.name == name)
            .ok_or_else(|| Error::UnknownPart {
                name: name.to_string(),
            })?;
        part.condition = condition;
        Ok(())
    }

    /// Part names in the order they were added.
    pub fn list_parts(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Mean condition over all parts, `None` without parts.
    pub fn car_condition(&self) -> Option<f64> {
        if self.parts.is_empty() {
            return None;
        }
        let total: f64 = self.parts.iter().map(|part| part.condition).sum();
        Some(total / self.parts.len() as f64)
    }

    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    pub fn clear_emergency(&mut self) {
        self.emergency = false;
    }

    /// Alert text while an emergency is active.
    pub fn emergency_alert(&self) -> Option<&'static str> {
        self.emergency.then_some(EMERGENCY_ALERT)
    }

    /// Forecast maintenance from the number of days the car has been driven.
    ///
    /// The first part found at or below its minimum short-circuits the
    /// forecast. Parts with no wear, or a car with no driving days, cannot
    /// be extrapolated and are reported as stable.
    pub fn forecast(&mut self, active_days: usize) -> MaintenanceReport {
        let days = active_days as f64;
        let mut schedule = Vec::with_capacity(self.parts.len());

        for part in &self.parts {
            if part.condition <= part.min_condition {
                self.emergency = true;
                warn!(part = %part.name, condition = part.condition, "part must be replaced");
                return MaintenanceReport::Replace {
                    part: part.name.clone(),
                    condition: part.condition,
                };
            }

            let decline = part.max_condition - part.condition;
            let per_day = if decline > 0.0 { days / decline } else { 0.0 };
            if per_day <= 0.0 {
                info!("{} remains at {}", part.name, part.condition);
                schedule.push((part.name.clone(), ServiceDue::Stable));
                continue;
            }

            let life_span = part.condition - part.min_condition;
            let days_left = (life_span / per_day).floor() as u64;
            if days_left == 0 {
                self.emergency = true;
                warn!(part = %part.name, "maintenance due today");
                schedule.push((part.name.clone(), ServiceDue::Today));
            } else {
                schedule.push((part.name.clone(), ServiceDue::InDays(days_left)));
            }
        }

        MaintenanceReport::Schedule { parts: schedule }
    }
}
