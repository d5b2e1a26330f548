use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the route planning library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Unreachable destinations and rejected energy checks are ordinary outcomes
/// and are reported through [`crate::TripOutcome`] and
/// [`crate::ChargingAdvice`], never through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name is not part of the road network.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a road carries a negative or non-finite distance.
    #[error("invalid distance {distance} km for road {from} -> {to}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Raised when an adjacency map is missing the mirrored edge of a road.
    #[error("road {from} -> {to} has no matching road {to} -> {from}")]
    AsymmetricRoad { from: String, to: String },

    /// Raised when a charging station is not a location in the network.
    #[error("charging station {name} is not a location in the network")]
    UnknownChargingStation { name: String },

    /// Raised when a battery is constructed or updated with invalid values.
    #[error("invalid battery: {message}")]
    InvalidBattery { message: String },

    /// Raised when the energy policy constants are unusable.
    #[error("invalid energy policy: {message}")]
    InvalidEnergyPolicy { message: String },

    /// Raised when a maintenance query names a part that was never added.
    #[error("unknown part: {name}")]
    UnknownPart { name: String },

    /// Raised when part conditions are inconsistent.
    #[error("invalid part: {message}")]
    InvalidPart { message: String },

    /// Explicitly configured network file does not exist.
    #[error("network configuration not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for configuration")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
