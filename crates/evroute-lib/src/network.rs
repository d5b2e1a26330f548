//! Road network with its charging stations.
//!
//! The built-in network is a small map of Doha with nine locations and four
//! charging stations. Alternative networks can be loaded from JSON through
//! [`crate::config`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Graph;

static BUILTIN_NETWORK: Lazy<Network> =
    Lazy::new(|| Network::from_spec(&builtin_spec()).expect("built-in network is valid"));

/// One two-way road of a network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

impl Road {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance_km,
        }
    }
}

/// Serializable description of a network, as stored in configuration files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Locations with no roads. Locations named by roads need not be listed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
    pub roads: Vec<Road>,
    #[serde(default)]
    pub charging_stations: Vec<String>,
}

/// Ordered set of locations able to recharge the battery.
///
/// Order matters: when two stations are equally close, the one listed first
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChargingStations {
    stations: Vec<String>,
}

impl ChargingStations {
    pub fn contains(&self, location: &str) -> bool {
        self.stations.iter().any(|station| station == location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Validated road graph plus the charging stations within it.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: Graph,
    charging_stations: ChargingStations,
}

impl Network {
    /// Build a network from a description, mirroring every road.
    ///
    /// Duplicate station names are collapsed; stations must be locations of
    /// the graph.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Self> {
        let mut builder = Graph::builder();
        for location in &spec.locations {
            builder.add_location(location.as_str());
        }
        for road in &spec.roads {
            builder.add_road(road.from.as_str(), road.to.as_str(), road.distance_km)?;
        }
        let graph = builder.build();

        let mut stations: Vec<String> = Vec::with_capacity(spec.charging_stations.len());
        for name in &spec.charging_stations {
            if !graph.contains(name) {
                return Err(Error::UnknownChargingStation { name: name.clone() });
            }
            if !stations.contains(name) {
                stations.push(name.clone());
            }
        }

        Ok(Self {
            graph,
            charging_stations: ChargingStations { stations },
        })
    }

    /// The Doha road network shipped with the simulator.
    pub fn builtin() -> Self {
        BUILTIN_NETWORK.clone()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn charging_stations(&self) -> &ChargingStations {
        &self.charging_stations
    }

    /// Convert back into a serializable description, one entry per road.
    pub fn to_spec(&self) -> NetworkSpec {
        let mut locations = Vec::new();
        let mut roads = Vec::new();
        for from in self.graph.all_locations() {
            if let Ok(neighbours) = self.graph.neighbours(from) {
                if neighbours.is_empty() {
                    locations.push(from.to_string());
                }
                for (to, &distance_km) in neighbours {
                    if from < to.as_str() {
                        roads.push(Road::new(from, to.as_str(), distance_km));
                    }
                }
            }
        }
        NetworkSpec {
            locations,
            roads,
            charging_stations: self.charging_stations.iter().map(String::from).collect(),
        }
    }
}

/// Description of the built-in Doha network.
pub fn builtin_spec() -> NetworkSpec {
    let roads = [
        ("The Pearl", "Landmark Mall", 13.0),
        ("The Pearl", "Doha Festival City", 17.0),
        ("The Pearl", "City Center", 9.0),
        ("Landmark Mall", "Doha Festival City", 8.0),
        ("Landmark Mall", "Souq Waqif", 11.0),
        ("Landmark Mall", "City Center", 10.0),
        ("Landmark Mall", "Aspire", 13.0),
        ("Doha Festival City", "Mall of Qatar", 20.0),
        ("Mall of Qatar", "Aspire", 19.0),
        ("Corniche", "Souq Waqif", 5.0),
        ("Corniche", "Doha Exhibition Center", 3.0),
        ("Souq Waqif", "Aspire", 11.0),
        ("City Center", "Doha Exhibition Center", 1.0),
    ];

    NetworkSpec {
        locations: Vec::new(),
        roads: roads
            .iter()
            .map(|&(from, to, distance)| Road::new(from, to, distance))
            .collect(),
        charging_stations: ["The Pearl", "Doha Festival City", "Mall of Qatar", "Aspire"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
    }
}
