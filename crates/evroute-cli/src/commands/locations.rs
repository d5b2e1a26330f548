use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use evroute_lib::Network;

use crate::output::{emit, OutputFormat};

#[derive(Debug, Serialize)]
pub struct LocationEntry {
    pub name: String,
    pub charging_station: bool,
    pub roads: usize,
}

/// List every location in the network, marking charging stations.
pub fn handle_locations<W: Write>(
    network: &Network,
    format: OutputFormat,
    out: &mut W,
) -> Result<Vec<LocationEntry>> {
    let graph = network.graph();
    let stations = network.charging_stations();
    let entries = graph
        .all_locations()
        .into_iter()
        .map(|name| -> Result<LocationEntry> {
            Ok(LocationEntry {
                name: name.to_string(),
                charging_station: stations.contains(name),
                roads: graph.neighbours(name)?.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    emit(out, format, &entries, |entries| render_text(entries))?;
    Ok(entries)
}

fn render_text(entries: &[LocationEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.charging_station { " [charging]" } else { "" };
            format!("{}{}", entry.name, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
