use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use evroute_lib::ChargingAdvice;

use crate::output::{emit, OutputFormat};
use crate::session::Session;

#[derive(Debug, Serialize)]
struct ChargeReport<'a> {
    origin: &'a str,
    #[serde(flatten)]
    advice: &'a ChargingAdvice,
    message: String,
    vehicle_location: &'a str,
    battery_kwh: f64,
}

/// Send the vehicle to the nearest charging station, or tell the driver to
/// charge where they are.
pub fn handle_charge<W: Write>(
    session: &mut Session,
    from: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<ChargingAdvice> {
    let origin = match from {
        Some(name) => session.network.graph().resolve(name)?.to_string(),
        None => session.vehicle.location().to_string(),
    };

    let (planner, vehicle) = session.planner();
    let advice = planner.suggest_charging(vehicle, &origin)?;

    let report = ChargeReport {
        origin: &origin,
        advice: &advice,
        message: advice.to_string(),
        vehicle_location: vehicle.location(),
        battery_kwh: vehicle.battery.level(),
    };
    emit(out, format, &report, |report| report.message.clone())?;
    Ok(advice)
}
