//! End-to-end tests for the `att` binary.
//!
//! Each test writes a snapshot and config into a temp directory and runs the
//! real binary against it with `HOME` pointed at that directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "zones": [
        {"zone_id": "z1", "name": "Warehouse"},
        {"zone_id": "z2", "name": "Office"}
    ],
    "persons": [
        {"person_id": "p1", "first_name": "Ana", "last_name": "Lopez", "zone_id": "z1"},
        {"person_id": "p2", "first_name": "Bruno", "zone_id": "z2"},
        {"person_id": "p3", "first_name": "Carla", "zone_id": "z1", "active": false}
    ],
    "events": [
        {"person_id": "p1", "timestamp": "2024-05-20T08:00:00", "direction": "ENTRY", "device_id": "DEV-A"},
        {"person_id": "p1", "timestamp": "2024-05-20T08:00:40", "direction": "ENTRY", "device_id": "DEV-A"},
        {"person_id": "p1", "timestamp": "2024-05-20T17:30:00", "direction": "EXIT", "device_id": "DEV-B"},
        {"person_id": "p2", "timestamp": "2024-05-20T09:00:00", "direction": "ENTRY", "device_id": "DEV-B"},
        {"person_id": "p2", "timestamp": "2024-05-21T09:00:00", "direction": "ENTRY", "device_id": "DEV-B"},
        {"person_id": "p2", "timestamp": "2024-05-21T15:00:00", "direction": "EXIT", "device_id": "DEV-B"},
        {"person_id": "p9", "timestamp": "2024-05-21T10:00:00", "direction": "ENTRY", "device_id": "DEV-C"}
    ]
}"#;

fn att_binary() -> String {
    env!("CARGO_BIN_EXE_att").to_string()
}

/// Writes the snapshot and a config pointing at it, returning the config path.
fn setup(temp: &Path, regular_day_minutes: u32) -> PathBuf {
    let snapshot_path = temp.join("snapshot.json");
    std::fs::write(&snapshot_path, SNAPSHOT).unwrap();

    let config_path = temp.join("att.toml");
    std::fs::write(
        &config_path,
        format!(
            "snapshot_path = {:?}\nregular_day_minutes = {regular_day_minutes}\n",
            snapshot_path.display().to_string()
        ),
    )
    .unwrap();
    config_path
}

/// An `att` command isolated from the caller's config and environment.
fn att_command(temp: &Path) -> Command {
    let mut command = Command::new(att_binary());
    command
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("ATT_SNAPSHOT_PATH")
        .env_remove("ATT_REGULAR_DAY_MINUTES")
        .env_remove("RUST_LOG");
    command
}

fn att(temp: &Path, args: &[&str]) -> Output {
    att_command(temp)
        .args(args)
        .output()
        .expect("failed to run att")
}

fn att_ok(temp: &Path, args: &[&str]) -> String {
    let output = att(temp, args);
    assert!(
        output.status.success(),
        "att {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_report_json_covers_every_person_day() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &["-c", config, "report", "--from", "2024-05-20", "--to", "2024-05-21", "--json"],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    // 3 persons x 2 days
    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(report["orphan_events"], 1);
    assert_eq!(report["summary"]["present"], 2);
    assert_eq!(report["summary"]["pending_exit"], 1);
    assert_eq!(report["summary"]["absent"], 3);

    let ana = rows
        .iter()
        .find(|r| r["person_id"] == "p1" && r["date"] == "2024-05-20")
        .unwrap();
    assert_eq!(ana["first_entry"], "2024-05-20T08:00:00");
    assert_eq!(ana["device_id"], "DEV-A");
    assert_eq!(ana["regular_hours"], 8.0);
    assert_eq!(ana["overtime_hours"], 1.5);
    assert_eq!(ana["zone_name"], "Warehouse");
}

#[test]
fn test_report_filters_and_status_view() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &[
            "-c",
            config,
            "report",
            "--from",
            "2024-05-20",
            "--to",
            "2024-05-21",
            "--zone",
            "z1",
            "--active-only",
            "--status",
            "absent",
            "--json",
        ],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["person_id"], "p1");
    assert_eq!(rows[0]["date"], "2024-05-21");
}

#[test]
fn test_device_filter_hides_other_terminals() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &[
            "-c",
            config,
            "report",
            "--from",
            "2024-05-20",
            "--to",
            "2024-05-20",
            "--person",
            "p1",
            "--device",
            "DEV-A",
            "--json",
        ],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let row = &report["rows"][0];
    assert_eq!(row["status"], "PENDING_EXIT");
    assert!(row["last_exit"].is_null());
}

#[test]
fn test_config_changes_overtime_threshold() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 540);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &["-c", config, "summary", "--from", "2024-05-20", "--to", "2024-05-20", "--json"],
    );
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["regular_hours"], 9.0);
    assert_eq!(summary["overtime_hours"], 0.5);
}

#[test]
fn test_snapshot_path_from_environment() {
    let temp = TempDir::new().unwrap();
    let snapshot_path = temp.path().join("from-env.json");
    std::fs::write(&snapshot_path, SNAPSHOT).unwrap();

    let output = att_command(temp.path())
        .env("ATT_SNAPSHOT_PATH", &snapshot_path)
        .args(["devices"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "DEV-A\nDEV-B\nDEV-C\n");
}

#[test]
fn test_summary_text() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &["-c", config, "summary", "--from", "2024-05-20", "--to", "2024-05-21"],
    );

    assert!(stdout.starts_with("ATTENDANCE SUMMARY: 2024-05-20 to 2024-05-21"));
    assert!(stdout.contains("Present:         2"));
    assert!(stdout.contains("Mid-shift now:   1"));
    assert!(stdout.contains("Warning: 1 punches reference persons not on the roster."));
}

#[test]
fn test_audit_shows_raw_punches() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let stdout = att_ok(
        temp.path(),
        &["-c", config, "audit", "--person", "p1", "--date", "2024-05-20"],
    );

    assert_eq!(
        stdout,
        "AUDIT: Ana Lopez (p1) on 2024-05-20\n\n\
         08:00:00  ENTRY  DEV-A\n\
         08:00:40  ENTRY  DEV-A\n\
         17:30:00  EXIT   DEV-B\n"
    );
}

#[test]
fn test_invalid_range_fails() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path(), 480);
    let config = config.to_str().unwrap();

    let output = att(
        temp.path(),
        &["-c", config, "report", "--from", "2024-05-21", "--to", "2024-05-20"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date range"), "stderr: {stderr}");
}

#[test]
fn test_negative_regular_day_fails() {
    let temp = TempDir::new().unwrap();
    setup(temp.path(), 480);
    let config_path = temp.path().join("bad.toml");
    std::fs::write(
        &config_path,
        format!(
            "snapshot_path = {:?}\nregular_day_minutes = -60\n",
            temp.path().join("snapshot.json").display().to_string()
        ),
    )
    .unwrap();

    let output = att(
        temp.path(),
        &["-c", config_path.to_str().unwrap(), "summary", "--from", "2024-05-20", "--to", "2024-05-20"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load configuration"), "stderr: {stderr}");
}

#[test]
fn test_missing_snapshot_fails() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("att.toml");
    std::fs::write(&config_path, "snapshot_path = \"/nonexistent/att/snapshot.json\"\n").unwrap();

    let output = att(temp.path(), &["-c", config_path.to_str().unwrap(), "devices"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read snapshot"), "stderr: {stderr}");
}
