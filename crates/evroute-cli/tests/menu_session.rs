use std::io::Cursor;

use evroute_cli::commands::menu::run_menu;
use evroute_cli::session::{Session, SessionOptions};
use evroute_lib::{Network, NetworkSource};

fn session(options: SessionOptions) -> Session {
    Session::with_network(Network::builtin(), NetworkSource::Builtin, &options)
        .expect("session starts")
}

fn run(session: &mut Session, script: &str) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    run_menu(session, &mut input, &mut output).expect("menu runs");
    String::from_utf8(output).expect("utf-8 output")
}

#[test]
fn navigation_moves_the_car_and_records_the_trip() {
    let mut session = session(SessionOptions::default());
    let output = run(&mut session, "4\nAspire\n5\n6\n");

    assert!(output.contains("You are currently at The Pearl."));
    assert!(output.contains("You are now at Aspire."));
    assert!(output.contains("Trip1: 26 km on"));
    assert_eq!(session.vehicle.location(), "Aspire");
    assert_eq!(session.vehicle.trips.len(), 1);
}

#[test]
fn unknown_destination_returns_to_the_menu() {
    let mut session = session(SessionOptions::default());
    let output = run(&mut session, "4\nNowhere\n5\n6\n");

    assert!(output.contains("Error - Your car is unable to travel to this location."));
    assert!(output.contains("No trips recorded."));
    assert!(output.contains("Exiting..."));
    assert_eq!(session.vehicle.location(), "The Pearl");
}

#[test]
fn low_battery_navigation_diverts_to_a_station() {
    let mut session = session(SessionOptions {
        battery_level: Some(10.0),
        location: Some("Corniche".to_string()),
        ..SessionOptions::default()
    });
    let output = run(&mut session, "4\nAspire\n6\n");

    assert!(output.contains("The car needs to be charged"));
    assert!(output.contains("will be travelling to The Pearl, which is 13 km away from here."));
    assert_eq!(session.vehicle.location(), "The Pearl");
    assert_eq!(session.vehicle.battery.level(), 75.0);
}

#[test]
fn maintenance_and_condition_reports() {
    let mut session = session(SessionOptions::default());
    let output = run(&mut session, "2\n3\n6\n");

    assert!(output.contains("--- Days until Maintenance ---"));
    assert!(output.contains("Heat Pump: no wear recorded"));
    assert!(output.contains("99.8%"));
}

#[test]
fn emergency_alert_is_shown_above_the_menu() {
    let mut session = session(SessionOptions::default());
    session
        .maintenance
        .set_condition("Rear Motor", 55.0)
        .expect("part exists");
    let output = run(&mut session, "2\n6\n");

    assert!(output.contains("Warning: The Rear Motor of your car needs to be replaced immediately!"));
    assert!(output.contains("ALERT: CAR REQUIRES MAINTENANCE IMMEDIATELY."));
}

#[test]
fn closed_input_ends_the_menu() {
    let mut session = session(SessionOptions::default());
    let output = run(&mut session, "7\n");
    assert!(output.contains("Incorrect input - Please enter a number between 1 and 6."));
    assert!(!output.contains("Exiting..."));
}

#[test]
fn custom_network_falls_back_to_first_location() {
    let network = evroute_lib::parse_network(
        r#"{ "roads": [{ "from": "Depot", "to": "Harbour", "distance_km": 4 }] }"#,
    )
    .expect("valid network");
    let session = Session::with_network(network, NetworkSource::Builtin, &SessionOptions::default())
        .expect("session starts");
    assert_eq!(session.vehicle.location(), "Depot");
}
