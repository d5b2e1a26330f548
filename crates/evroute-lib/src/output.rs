use std::fmt::Write;

use serde::Serialize;

use crate::ledger::{Trip, TripLedger};
use crate::routing::TripOutcome;
use crate::vehicle::Vehicle;

/// Headline status of a trip request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Approved,
    InsufficientEnergy,
    Unreachable,
}

impl TripStatus {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Approved => "approved",
            TripStatus::InsufficientEnergy => "needs charging",
            TripStatus::Unreachable => "unreachable",
        }
    }
}

/// Flat, serialisable view of a trip request and the vehicle state after it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TripSummary {
    pub status: TripStatus,
    pub origin: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip: Option<String>,
    pub battery_kwh: f64,
}

impl TripSummary {
    pub fn from_outcome(
        origin: &str,
        destination: &str,
        outcome: &TripOutcome,
        vehicle: &Vehicle,
    ) -> Self {
        let status = match outcome {
            TripOutcome::Approved { .. } => TripStatus::Approved,
            TripOutcome::InsufficientEnergy { .. } => TripStatus::InsufficientEnergy,
            TripOutcome::Unreachable { .. } => TripStatus::Unreachable,
        };
        Self {
            status,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km: outcome.distance_km(),
            steps: outcome
                .path()
                .map(|path| path.steps.clone())
                .unwrap_or_default(),
            trip: outcome.trip().map(|trip| trip.name.clone()),
            battery_kwh: vehicle.battery.level(),
        }
    }

    /// Multi-line plain text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.status == TripStatus::Unreachable {
            let _ = writeln!(out, "Cannot reach destination!");
            let _ = write!(
                out,
                "No road connects {} to {}.",
                self.origin, self.destination
            );
            return out;
        }

        let _ = writeln!(
            out,
            "Route from {} to {} ({}):",
            self.origin,
            self.destination,
            self.status.label()
        );
        for (index, step) in self.steps.iter().enumerate() {
            let marker = if index == 0 {
                '+'
            } else if index + 1 == self.steps.len() {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(out, "  {marker} {step}");
        }
        if let Some(distance) = self.distance_km {
            let _ = writeln!(out, "Distance: {distance} km");
        }
        match (&self.trip, self.status) {
            (Some(name), _) => {
                let _ = write!(out, "Recorded as {name}. Battery: {:.2} kWh", self.battery_kwh);
            }
            (None, TripStatus::InsufficientEnergy) => {
                let _ = write!(
                    out,
                    "The car needs to be charged to complete this trip. Battery: {:.2} kWh",
                    self.battery_kwh
                );
            }
            (None, _) => {
                let _ = write!(out, "Battery: {:.2} kWh", self.battery_kwh);
            }
        }
        out
    }
}

/// Serialisable view of the trip history with its aggregates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LedgerSummary {
    pub trips: Vec<Trip>,
    pub total_distance_km: f64,
    pub active_days: usize,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &TripLedger) -> Self {
        Self {
            trips: ledger.iter().cloned().collect(),
            total_distance_km: ledger.total_distance(),
            active_days: ledger.active_days(),
        }
    }

    pub fn render_text(&self) -> String {
        if self.trips.is_empty() {
            return "No trips recorded.".to_string();
        }
        let mut out = String::new();
        for trip in &self.trips {
            let _ = writeln!(
                out,
                "{}: {} km on {}",
                trip.name,
                trip.distance_km,
                trip.date_label()
            );
        }
        let _ = write!(
            out,
            "Total: {} km over {} day(s)",
            self.total_distance_km, self.active_days
        );
        out
    }
}
