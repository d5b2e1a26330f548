use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture network present")
}

fn cli() -> Command {
    cargo_bin_cmd!("evroute")
}

/// Command isolated from the caller's environment and user configuration.
fn prepare_command() -> (Command, tempfile::TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let mut cmd = cli();
    cmd.env_remove("EVROUTE_NETWORK")
        .env("HOME", temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("RUST_LOG", "error");
    (cmd, temp_dir)
}

#[test]
fn route_prints_path_and_records_trip() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--to", "Aspire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ The Pearl"))
        .stdout(predicate::str::contains("| Landmark Mall"))
        .stdout(predicate::str::contains("- Aspire"))
        .stdout(predicate::str::contains("Distance: 26 km"))
        .stdout(predicate::str::contains("Recorded as Trip1"));
}

#[test]
fn route_from_overrides_vehicle_location() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--from", "Aspire", "--to", "City Center"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 20 km"))
        .stdout(predicate::str::contains("| Souq Waqif"));
}

#[test]
fn low_battery_rejects_trip_without_failing() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--battery-level", "5", "route", "--to", "Aspire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs to be charged"))
        .stdout(predicate::str::contains("Recorded as").not());
}

#[test]
fn unknown_destination_fails_with_suggestion() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["route", "--to", "Aspir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown location: Aspir"))
        .stderr(predicate::str::contains("Aspire"));
}

#[test]
fn route_json_output_is_structured() {
    let (mut cmd, _temp) = prepare_command();
    let output = cmd
        .args(["--format", "json", "route", "--to", "Aspire"])
        .output()
        .expect("run evroute");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["status"], "approved");
    assert_eq!(json["distance_km"], 26.0);
    assert_eq!(json["trip"], "Trip1");
    assert_eq!(json["steps"][0], "The Pearl");
}

#[test]
fn charge_diverts_to_nearest_station() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["charge", "--from", "Corniche"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "will be travelling to The Pearl, which is 13 km away from here.",
        ));
}

#[test]
fn charge_at_station_asks_to_charge_in_place() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("charge")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You are next to a charging station.",
        ));
}

#[test]
fn explicit_network_reports_unreachable_destination() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("--network")
        .arg(fixture_path("split_network.json"))
        .args(["--location", "Depot", "route", "--to", "Terminal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot reach destination!"));
}

#[test]
fn environment_network_is_used_for_locations() {
    let (mut cmd, temp) = prepare_command();
    let network_path = temp.path().join("network.json");
    fs::copy(fixture_path("split_network.json"), &network_path).expect("copy fixture");

    cmd.env("EVROUTE_NETWORK", &network_path)
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbour [charging]"))
        .stdout(predicate::str::contains("Lighthouse"))
        .stdout(predicate::str::contains("The Pearl").not());
}

#[test]
fn missing_network_file_fails() {
    let (mut cmd, temp) = prepare_command();
    cmd.arg("--network")
        .arg(temp.path().join("absent.json"))
        .arg("locations")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the road network"));
}

#[test]
fn locations_json_marks_stations() {
    let (mut cmd, _temp) = prepare_command();
    let output = cmd
        .args(["--format", "json", "locations"])
        .output()
        .expect("run evroute");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let entries = json.as_array().expect("array of locations");
    let aspire = entries
        .iter()
        .find(|entry| entry["name"] == "Aspire")
        .expect("Aspire listed");
    assert_eq!(aspire["charging_station"], true);
}

#[test]
fn menu_is_the_default_command() {
    let (mut cmd, _temp) = prepare_command();
    cmd.write_stdin("1\n9\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Menu"))
        .stdout(predicate::str::contains("75.00 kWh (100.0%)"))
        .stdout(predicate::str::contains(
            "Incorrect input - Please enter a number between 1 and 6.",
        ))
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn invalid_battery_level_is_rejected() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--battery-level", "-3", "locations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --battery-level"));
}
