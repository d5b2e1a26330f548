use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Display format for trip dates.
pub const TRIP_DATE_FORMAT: &str = "%d/%m/%Y";

/// Prefix of generated trip names.
const TRIP_NAME_PREFIX: &str = "Trip";

/// A completed, approved trip. Never modified once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub name: String,
    pub distance_km: f64,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
}

impl Trip {
    /// Date rendered as day/month/year.
    pub fn date_label(&self) -> String {
        self.date.format(TRIP_DATE_FORMAT).to_string()
    }
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(TRIP_DATE_FORMAT))
}

/// Every approved trip, keyed by its generated name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TripLedger {
    trips: BTreeMap<String, Trip>,
}

impl TripLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trip under the lowest unused `Trip<n>` name.
    pub fn record(&mut self, distance_km: f64, date: NaiveDate) -> &Trip {
        let name = self.next_name();
        let trip = Trip {
            name: name.clone(),
            distance_km,
            date,
        };
        self.trips.entry(name).or_insert(trip)
    }

    fn next_name(&self) -> String {
        (1u64..)
            .map(|n| format!("{TRIP_NAME_PREFIX}{n}"))
            .find(|name| !self.trips.contains_key(name))
            .unwrap_or_else(|| format!("{TRIP_NAME_PREFIX}{}", self.trips.len() + 1))
    }

    pub fn get(&self, name: &str) -> Option<&Trip> {
        self.trips.get(name)
    }

    /// Trips in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Sum of all recorded distances.
    pub fn total_distance(&self) -> f64 {
        self.trips.values().map(|trip| trip.distance_km).sum()
    }

    /// Number of distinct days on which the car was driven.
    pub fn active_days(&self) -> usize {
        self.trips
            .values()
            .map(|trip| trip.date)
            .collect::<BTreeSet<_>>()
            .len()
    }
}
