//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a temp directory so
//! configuration never touches the real user profile.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const HISTORY: &str = r#"[
    {"date": "2025-03-10T07:00:00Z", "caffeine_mg": 100},
    {"date": "2025-03-10T09:32:00Z", "caffeine_mg": 64},
    {"date": "2025-03-09T22:00:00Z", "caffeine_mg": 150}
]"#;

const NOW: &str = "2025-03-10T12:00:00Z";

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_caffeine-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("CAFFEINE_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn fixture(contents: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, contents).unwrap();
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn test_curve_json() {
    let (home, file) = fixture(HISTORY);
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["curve", "--file", &file, "--now", NOW, "--range", "1d", "--json"],
    );
    assert_eq!(code, 0, "curve failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["range"], "1d");
    assert_eq!(report["half_life_hours"], 5.0);
    let samples = report["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 577);

    let at_first_drink = samples
        .iter()
        .find(|s| s["date"] == "2025-03-10T07:00:00Z")
        .unwrap();
    // 150 mg from 9 hours earlier is still partly there
    let expected = 100.0 + 150.0 * 0.5_f64.powf(9.0 / 5.0);
    let got = at_first_drink["caffeine_remaining_mg"].as_f64().unwrap();
    assert!((got - expected).abs() <= 0.01, "got {got}, expected {expected}");
}

#[test]
fn test_curve_chart() {
    let (home, file) = fixture(HISTORY);
    let (stdout, stderr, code) = run_cli(home.path(), &["curve", "--file", &file, "--now", NOW]);
    assert_eq!(code, 0, "curve failed: {stderr}");
    assert!(stdout.contains("Caffeine Over Time (Today)"));
    assert!(stdout.contains("Intakes: 3"));
}

#[test]
fn test_curve_empty_history() {
    let (home, file) = fixture("[]");
    let (stdout, _, code) = run_cli(home.path(), &["curve", "--file", &file, "--now", NOW]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No caffeine data available"));
}

#[test]
fn test_annotate_json() {
    let (home, file) = fixture(HISTORY);
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["annotate", "--file", &file, "--now", NOW, "--json"],
    );
    assert_eq!(code, 0, "annotate failed: {stderr}");

    let markers: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let markers = markers.as_array().unwrap();
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[0]["matched"], "exact");
    assert_eq!(markers[1]["matched"], "nearest");
    assert_eq!(markers[1]["sample"]["date"], "2025-03-10T09:30:00Z");
}

#[test]
fn test_meter_json() {
    let (home, file) = fixture(HISTORY);
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["meter", "--file", &file, "--date", "2025-03-10", "--json"],
    );
    assert_eq!(code, 0, "meter failed: {stderr}");

    let reading: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(reading["intake_mg"], 164.0);
    assert_eq!(reading["drink_count"], 2);
    assert_eq!(reading["remaining_allowance_mg"], 236.0);
}

#[test]
fn test_meter_uses_configured_allowance() {
    let (home, file) = fixture(HISTORY);
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "meter.daily_allowance_mg", "150"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["meter", "--file", &file, "--date", "2025-03-10"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Over the daily allowance by 14 mg"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "chart.default_range"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1d");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "chart.default_range", "7d"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "chart.default_range"]);
    assert_eq!(stdout.trim(), "7d");

    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "chart.half_life", "4"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_rejects_negative_amounts() {
    let (home, file) = fixture(r#"[{"date": "2025-03-10T07:00:00Z", "caffeine_mg": -20}]"#);
    let (_, stderr, code) = run_cli(home.path(), &["curve", "--file", &file, "--now", NOW]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid caffeine amount"));
}

#[test]
fn test_rejects_unknown_range() {
    let (home, file) = fixture(HISTORY);
    let (_, _, code) = run_cli(home.path(), &["curve", "--file", &file, "--range", "2w"]);
    assert_ne!(code, 0);
}

#[test]
fn test_chat_requires_token() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(home.path(), &["chat", "how", "much", "is", "too", "much?"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Not authenticated"));
}

#[test]
fn test_chat_needs_a_message() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["chat"]);
    assert_ne!(code, 0);
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("caffeine-cli"));
}
