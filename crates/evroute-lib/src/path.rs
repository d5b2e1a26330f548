use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{Adjacency, Graph};

/// Minimum-distance route between two locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    /// Summed road distance in kilometres.
    pub distance_km: f64,
    /// Locations from origin to destination, both inclusive.
    pub steps: Vec<String>,
}

impl ShortestPath {
    pub fn origin(&self) -> &str {
        &self.steps[0]
    }

    pub fn destination(&self) -> &str {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of roads travelled.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of a single-source Dijkstra run over the whole network.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTable {
    origin: String,
    distances: BTreeMap<String, f64>,
    predecessors: BTreeMap<String, String>,
}

impl DistanceTable {
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Tentative distance to `location`; infinite when unreachable, `None`
    /// when the location is not part of the network.
    pub fn distance_to(&self, location: &str) -> Option<f64> {
        self.distances.get(location).copied()
    }

    /// Whether a finite route to `location` exists.
    pub fn is_reachable(&self, location: &str) -> bool {
        self.distance_to(location).is_some_and(f64::is_finite)
    }

    /// Rebuild the route to `destination` by walking predecessor links back
    /// to the origin. Returns `None` when the destination is unreachable or
    /// unknown.
    pub fn path_to(&self, destination: &str) -> Option<ShortestPath> {
        let distance_km = self.distance_to(destination)?;
        if !distance_km.is_finite() {
            return None;
        }

        let mut steps = vec![destination.to_string()];
        let mut current = destination;
        while current != self.origin {
            let previous = self.predecessors.get(current)?;
            steps.push(previous.clone());
            current = previous;
        }
        steps.reverse();

        Some(ShortestPath { distance_km, steps })
    }
}

/// Run Dijkstra's algorithm from `origin` over every location of `graph`.
///
/// The frontier is scanned linearly, which is plenty for networks of this
/// size. The search does not stop early: every location, reachable or not,
/// is visited once. Among unvisited locations with equal tentative distance
/// the lexicographically smallest name is settled first.
pub fn shortest_distances(graph: &Graph, origin: &str) -> Result<DistanceTable> {
    let origin = graph.resolve(origin)?.to_string();
    let mut unvisited = graph.working_copy();

    let mut distances: BTreeMap<String, f64> = unvisited
        .keys()
        .map(|location| (location.clone(), f64::INFINITY))
        .collect();
    distances.insert(origin.clone(), 0.0);
    let mut predecessors: BTreeMap<String, String> = BTreeMap::new();
    let mut visited = 0usize;

    while let Some(current) = closest_unvisited(&unvisited, &distances) {
        let neighbours = unvisited.remove(&current).unwrap_or_default();
        let current_distance = distances[&current];

        for (next, weight) in neighbours {
            let candidate = current_distance + weight;
            let known = distances.get(&next).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                distances.insert(next.clone(), candidate);
                predecessors.insert(next, current.clone());
            }
        }
        visited += 1;
    }

    debug!(
        origin = %origin,
        visited,
        reachable = distances.values().filter(|d| d.is_finite()).count(),
        "computed shortest distances"
    );

    Ok(DistanceTable {
        origin,
        distances,
        predecessors,
    })
}

/// Find the minimum-distance route from `origin` to `destination`.
///
/// Returns `Ok(None)` when the two locations lie in disconnected parts of
/// the network, and an error when either name is unknown. Asking for the
/// route from a location to itself yields a zero-length, single-step path.
pub fn shortest_path(
    graph: &Graph,
    origin: &str,
    destination: &str,
) -> Result<Option<ShortestPath>> {
    let destination = graph.resolve(destination)?;
    let table = shortest_distances(graph, origin)?;
    let path = table.path_to(destination);

    if path.is_none() {
        debug!(origin, destination, "destination unreachable");
    }
    Ok(path)
}

fn closest_unvisited(
    unvisited: &Adjacency,
    distances: &BTreeMap<String, f64>,
) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for location in unvisited.keys() {
        let distance = distances.get(location).copied().unwrap_or(f64::INFINITY);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((location, distance)),
        }
    }
    best.map(|(location, _)| location.clone())
}
