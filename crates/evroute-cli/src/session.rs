//! Simulation state shared by every command: network, vehicle and parts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use evroute_lib::vehicle::DEFAULT_START_LOCATION;
use evroute_lib::{
    load_network, Battery, MaintenanceMonitor, Network, NetworkSource, TripPlanner, Vehicle,
};

/// Options that shape the initial simulation state.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Network file overriding the environment and built-in network.
    pub network: Option<PathBuf>,
    /// Starting battery charge in kWh; full when omitted.
    pub battery_level: Option<f64>,
    /// Starting location; "The Pearl" when omitted.
    pub location: Option<String>,
}

/// Everything one run of the simulator operates on.
#[derive(Debug)]
pub struct Session {
    pub network: Network,
    pub source: NetworkSource,
    pub vehicle: Vehicle,
    pub maintenance: MaintenanceMonitor,
}

impl Session {
    pub fn start(options: &SessionOptions) -> Result<Self> {
        let (network, source) = load_network(options.network.as_deref())
            .context("failed to load the road network")?;
        Self::with_network(network, source, options)
    }

    /// Build a session around an already loaded network.
    pub fn with_network(
        network: Network,
        source: NetworkSource,
        options: &SessionOptions,
    ) -> Result<Self> {
        let mut battery = Battery::default();
        if let Some(level) = options.battery_level {
            battery
                .set_level(level)
                .context("invalid --battery-level")?;
        }

        let requested = options
            .location
            .as_deref()
            .unwrap_or(DEFAULT_START_LOCATION);
        let location = match network.graph().resolve(requested) {
            Ok(location) => location.to_string(),
            Err(err) if options.location.is_some() => {
                return Err(err).context("invalid --location");
            }
            Err(_) => {
                // Custom networks need not contain the default start.
                let fallback = network
                    .graph()
                    .all_locations()
                    .into_iter()
                    .next()
                    .context("the road network has no locations")?
                    .to_string();
                debug!(location = %fallback, "default start location missing; using first location");
                fallback
            }
        };

        Ok(Self {
            network,
            source,
            vehicle: Vehicle::new(location, battery),
            maintenance: MaintenanceMonitor::with_default_parts(),
        })
    }

    /// Planner over this session's network alongside the vehicle it drives.
    pub fn planner(&mut self) -> (TripPlanner<'_>, &mut Vehicle) {
        (TripPlanner::new(&self.network), &mut self.vehicle)
    }
}
