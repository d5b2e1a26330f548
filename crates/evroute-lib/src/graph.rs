use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Minimum similarity for a location to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Maximum number of suggestions attached to an unknown-location error.
const MAX_SUGGESTIONS: usize = 3;

/// Outgoing roads of a single location, keyed by neighbour name.
pub type Neighbours = BTreeMap<String, f64>;

/// Location name to outgoing roads.
///
/// Ordered maps keep iteration deterministic, which the router relies on to
/// break ties between equally distant locations.
pub type Adjacency = BTreeMap<String, Neighbours>;

/// Static weighted road network used by the router.
///
/// Edge lookups are directed (`from -> to`). Graphs produced by
/// [`GraphBuilder`] mirror every road in both directions and graphs produced
/// by [`Graph::from_adjacency`] are checked for symmetry, so in practice the
/// network is undirected.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<Adjacency>,
}

impl Graph {
    /// Start building a graph one road at a time.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Validate an adjacency map and wrap it as a graph.
    ///
    /// Every distance must be finite and non-negative, every neighbour must
    /// itself be a location, and every road must be mirrored with the same
    /// distance.
    pub fn from_adjacency(adjacency: Adjacency) -> Result<Self> {
        for (from, neighbours) in &adjacency {
            for (to, &distance) in neighbours {
                validate_distance(from, to, distance)?;
                let mirrored = adjacency
                    .get(to)
                    .and_then(|back| back.get(from))
                    .copied();
                match mirrored {
                    Some(back) if back == distance => {}
                    _ => {
                        return Err(Error::AsymmetricRoad {
                            from: from.clone(),
                            to: to.clone(),
                        })
                    }
                }
            }
        }

        Ok(Self {
            adjacency: Arc::new(adjacency),
        })
    }

    /// Return the roads leaving `location`.
    pub fn neighbours(&self, location: &str) -> Result<&Neighbours> {
        self.adjacency
            .get(location)
            .ok_or_else(|| self.unknown_location(location))
    }

    /// Every location in the network, in name order.
    pub fn all_locations(&self) -> BTreeSet<&str> {
        self.adjacency.keys().map(String::as_str).collect()
    }

    /// Whether `location` is part of the network.
    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Distance of the direct road `from -> to`, if there is one.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Independent deep copy of the adjacency map.
    ///
    /// Consumers may mutate the copy freely; the graph itself is never
    /// affected.
    pub fn working_copy(&self) -> Adjacency {
        self.adjacency.as_ref().clone()
    }

    /// Resolve a user-supplied name to the canonical location name.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.adjacency
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| self.unknown_location(name))
    }

    /// Locations whose names resemble `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .adjacency
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    fn unknown_location(&self, name: &str) -> Error {
        Error::UnknownLocation {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, MAX_SUGGESTIONS),
        }
    }
}

/// Incremental constructor that mirrors every road it is given.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: Adjacency,
}

impl GraphBuilder {
    /// Register a location with no roads yet.
    pub fn add_location(&mut self, name: impl Into<String>) -> &mut Self {
        self.adjacency.entry(name.into()).or_default();
        self
    }

    /// Add a two-way road between `from` and `to`.
    ///
    /// Adding the same pair twice keeps the latest distance in both
    /// directions.
    pub fn add_road(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance_km: f64,
    ) -> Result<&mut Self> {
        let from = from.into();
        let to = to.into();
        validate_distance(&from, &to, distance_km)?;

        self.adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone(), distance_km);
        self.adjacency
            .entry(to)
            .or_default()
            .insert(from, distance_km);
        Ok(self)
    }

    pub fn build(self) -> Graph {
        Graph {
            adjacency: Arc::new(self.adjacency),
        }
    }
}

fn validate_distance(from: &str, to: &str, distance: f64) -> Result<()> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDistance {
            from: from.to_string(),
            to: to.to_string(),
            distance,
        })
    }
}
