//! Interactive main menu.
//!
//! The loop reads from any [`BufRead`] and writes to any [`Write`], so it
//! runs against stdin/stdout in the binary and against buffers in tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use evroute_lib::{LedgerSummary, TripOutcome, TripSummary};

use crate::session::Session;

const INVALID_CHOICE: &str = "Incorrect input - Please enter a number between 1 and 6.";

/// Main menu entries, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    BatteryLevel,
    MaintenanceDate,
    CarCondition,
    Navigation,
    Trips,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::BatteryLevel),
            "2" => Some(Self::MaintenanceDate),
            "3" => Some(Self::CarCondition),
            "4" => Some(Self::Navigation),
            "5" => Some(Self::Trips),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Main Menu")?;
    writeln!(out, "---------")?;
    writeln!(out, "1. Battery Level")?;
    writeln!(out, "2. Maintenance Date")?;
    writeln!(out, "3. Car Condition")?;
    writeln!(out, "4. Navigation")?;
    writeln!(out, "5. Trips")?;
    writeln!(out, "6. Exit")?;
    writeln!(out, "-------------------")?;
    writeln!(out, "Please choose (1-6):")?;
    out.flush()?;
    Ok(())
}

/// Read one line, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the menu until the driver picks Exit or input runs out.
pub fn run_menu<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        if let Some(alert) = session.maintenance.emergency_alert() {
            writeln!(out, "{alert}")?;
        }
        print_menu(out)?;

        let Some(line) = read_line(input)? else {
            debug!("input closed; leaving menu");
            return Ok(());
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::BatteryLevel) => {
                let battery = &session.vehicle.battery;
                writeln!(out, "--- Battery Level ---")?;
                writeln!(
                    out,
                    "{:.2} kWh ({:.1}%)",
                    battery.level(),
                    battery.percentage()
                )?;
                writeln!(out, "---------------------")?;
            }
            Some(MenuChoice::MaintenanceDate) => {
                let active_days = session.vehicle.trips.active_days();
                let report = session.maintenance.forecast(active_days);
                writeln!(out, "--- Days until Maintenance ---")?;
                writeln!(out, "{report}")?;
                writeln!(out, "------------------------------")?;
            }
            Some(MenuChoice::CarCondition) => {
                writeln!(out, "--- Car Condition ---")?;
                match session.maintenance.car_condition() {
                    Some(condition) => writeln!(out, "{condition:.1}%")?,
                    None => writeln!(out, "No parts are monitored.")?,
                }
                writeln!(out, "------------------------------")?;
            }
            Some(MenuChoice::Navigation) => navigate(session, input, out)?,
            Some(MenuChoice::Trips) => {
                let summary = LedgerSummary::from_ledger(&session.vehicle.trips);
                writeln!(out, "--- Trips ---")?;
                writeln!(out, "{}", summary.render_text())?;
                writeln!(out, "-------------")?;
            }
            Some(MenuChoice::Exit) => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            None => writeln!(out, "{INVALID_CHOICE}")?,
        }
        writeln!(out)?;
    }
}

fn navigate<R: BufRead, W: Write>(session: &mut Session, input: &mut R, out: &mut W) -> Result<()> {
    let origin = session.vehicle.location().to_string();
    writeln!(out, "You are currently at {origin}.")?;
    writeln!(out, "Where would you like to go:")?;
    out.flush()?;

    let Some(requested) = read_line(input)? else {
        return Ok(());
    };
    let destination = match session.network.graph().resolve(&requested) {
        Ok(destination) => destination.to_string(),
        Err(err) => {
            writeln!(
                out,
                "Error - Your car is unable to travel to this location. {err}"
            )?;
            return Ok(());
        }
    };

    let (planner, vehicle) = session.planner();
    let outcome = planner.plan_trip(vehicle, &origin, &destination)?;
    let summary = TripSummary::from_outcome(&origin, &destination, &outcome, vehicle);
    writeln!(out, "{}", summary.render_text())?;

    match outcome {
        TripOutcome::Approved { .. } => {
            writeln!(out, "You are now at {}.", vehicle.location())?;
        }
        TripOutcome::InsufficientEnergy { .. } => {
            let advice = planner.suggest_charging(vehicle, &origin)?;
            writeln!(out, "{advice}")?;
        }
        TripOutcome::Unreachable { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_numbers() {
        assert_eq!(MenuChoice::parse(" 4\n"), Some(MenuChoice::Navigation));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("one"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
