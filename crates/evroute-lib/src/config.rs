use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::{Network, NetworkSpec};

/// Environment variable naming a network file to load.
pub const NETWORK_ENV_VAR: &str = "EVROUTE_NETWORK";

/// Filename looked up in the platform configuration directory.
const NETWORK_FILENAME: &str = "network.json";

/// Where a loaded network came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSource {
    /// Path given explicitly by the caller.
    Explicit(PathBuf),
    /// Path taken from [`NETWORK_ENV_VAR`].
    Environment(PathBuf),
    /// `network.json` found in the platform configuration directory.
    UserConfig(PathBuf),
    /// The network compiled into the library.
    Builtin,
}

impl NetworkSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            NetworkSource::Explicit(path)
            | NetworkSource::Environment(path)
            | NetworkSource::UserConfig(path) => Some(path),
            NetworkSource::Builtin => None,
        }
    }
}

/// Resolve the platform location of the optional user network file.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "evroute", "evroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(NETWORK_FILENAME))
}

/// Decide which network to load.
///
/// Resolution order: explicit path, then [`NETWORK_ENV_VAR`], then
/// `network.json` in the platform configuration directory when it exists,
/// then the built-in network.
pub fn resolve_network_source(explicit: Option<&Path>) -> NetworkSource {
    if let Some(path) = explicit {
        return NetworkSource::Explicit(path.to_path_buf());
    }

    if let Some(value) = env::var_os(NETWORK_ENV_VAR).filter(|v| !v.is_empty()) {
        return NetworkSource::Environment(PathBuf::from(value));
    }

    match default_network_path() {
        Ok(path) if path.is_file() => NetworkSource::UserConfig(path),
        Ok(path) => {
            debug!(path = %path.display(), "no user network file; using built-in network");
            NetworkSource::Builtin
        }
        Err(err) => {
            debug!(error = %err, "configuration directory unavailable; using built-in network");
            NetworkSource::Builtin
        }
    }
}

/// Load the network selected by [`resolve_network_source`].
pub fn load_network(explicit: Option<&Path>) -> Result<(Network, NetworkSource)> {
    let source = resolve_network_source(explicit);
    let network = match source.path() {
        Some(path) => load_network_file(path)?,
        None => Network::builtin(),
    };
    info!(
        source = ?source,
        locations = network.graph().len(),
        stations = network.charging_stations().len(),
        "network loaded"
    );
    Ok((network, source))
}

/// Parse and validate a JSON network description.
pub fn load_network_file(path: &Path) -> Result<Network> {
    if !path.is_file() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    parse_network(&contents)
}

/// Parse and validate a JSON network description held in memory.
pub fn parse_network(json: &str) -> Result<Network> {
    let spec: NetworkSpec = serde_json::from_str(json)?;
    Network::from_spec(&spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom-network.json");
        assert_eq!(
            resolve_network_source(Some(&path)),
            NetworkSource::Explicit(path.clone())
        );
    }

    #[test]
    fn parse_network_mirrors_roads() {
        let network = parse_network(
            r#"{
                "roads": [{ "from": "Depot", "to": "Harbour", "distance_km": 4.5 }],
                "charging_stations": ["Depot"]
            }"#,
        )
        .unwrap();
        assert_eq!(network.graph().distance("Harbour", "Depot"), Some(4.5));
        assert!(network.charging_stations().contains("Depot"));
    }

    #[test]
    fn charging_stations_are_optional() {
        let network =
            parse_network(r#"{ "roads": [{ "from": "A", "to": "B", "distance_km": 1 }] }"#)
                .unwrap();
        assert!(network.charging_stations().is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = parse_network("{ \"roads\": 3 }").unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let error = load_network_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(error, Error::NetworkNotFound { .. }));
    }
}
