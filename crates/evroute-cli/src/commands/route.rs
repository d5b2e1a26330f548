use std::io::Write;

use anyhow::Result;

use evroute_lib::TripSummary;

use crate::output::{emit, OutputFormat};
use crate::session::Session;

/// Arguments for `evroute route`.
#[derive(Debug, Clone)]
pub struct RouteArgs {
    pub to: String,
    pub from: Option<String>,
}

/// Plan a trip from the vehicle's location (or `--from`) to `--to`.
///
/// Rejected and unreachable trips are reported, not treated as failures.
/// Unknown location names are errors.
pub fn handle_route<W: Write>(
    session: &mut Session,
    args: &RouteArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<TripSummary> {
    let graph = session.network.graph();
    let origin = match &args.from {
        Some(name) => graph.resolve(name)?.to_string(),
        None => session.vehicle.location().to_string(),
    };
    let destination = graph.resolve(&args.to)?.to_string();

    let (planner, vehicle) = session.planner();
    let outcome = planner.plan_trip(vehicle, &origin, &destination)?;
    let summary = TripSummary::from_outcome(&origin, &destination, &outcome, vehicle);
    emit(out, format, &summary, TripSummary::render_text)?;
    Ok(summary)
}
