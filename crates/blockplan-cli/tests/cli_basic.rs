//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points HOME at its own temp directory so the user's config is untouched.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command with an isolated home directory and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "blockplan-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("BLOCKPLAN_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_plan_single_task() {
    let home = TempDir::new().unwrap();
    let input = write_file(
        &home,
        "input.json",
        r#"{
            "events": [],
            "tasks": [{ "id": "t1", "title": "Write report", "priority": "high" }]
        }"#,
    );

    let (code, stdout, stderr) = run_cli(
        home.path(),
        &["plan", "--input", &input, "--date", "2026-03-02", "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0, "plan failed: {stderr}");

    let blocks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let blocks = blocks.as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["title"], "Focus: Write report");
    assert!(stdout.contains("2026-03-02T09:00:00Z"));
    assert!(stdout.contains("2026-03-02T10:30:00Z"));
}

#[test]
fn test_plan_uses_configured_hours() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "scheduling.start_time", "13:00"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let input = write_file(
        &home,
        "input.json",
        r#"{ "tasks": [{ "id": "t1", "title": "Review", "priority": "medium" }] }"#,
    );
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--input", &input, "--date", "2026-03-02", "--now", "2026-03-02T08:00:00Z"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("2026-03-02T13:00:00Z"));
}

#[test]
fn test_slots() {
    let home = TempDir::new().unwrap();
    let input = write_file(
        &home,
        "input.json",
        r#"{
            "events": [{
                "id": "e1",
                "title": "Standup",
                "start_time": "2026-03-02T10:00:00Z",
                "end_time": "2026-03-02T11:00:00Z"
            }]
        }"#,
    );

    let (code, stdout, stderr) = run_cli(home.path(), &["slots", "--input", &input, "--date", "2026-03-02"]);
    assert_eq!(code, 0, "slots failed: {stderr}");

    let slots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 2);
}

#[test]
fn test_conflicts() {
    let home = TempDir::new().unwrap();
    let input = write_file(
        &home,
        "events.json",
        r#"[
            { "id": "a", "start_time": "2026-03-02T09:00:00Z", "end_time": "2026-03-02T09:30:00Z" },
            { "id": "b", "start_time": "2026-03-02T09:15:00Z", "end_time": "2026-03-02T09:45:00Z" }
        ]"#,
    );

    let (code, stdout, _) = run_cli(home.path(), &["conflicts", "--input", &input]);
    assert_eq!(code, 0);

    let conflicts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["at"], "2026-03-02T09:15:00Z");
}

#[test]
fn test_conflicts_rejects_unusable_tick() {
    let home = TempDir::new().unwrap();
    let input = write_file(&home, "events.json", "[]");

    for tick in ["0", "9223372036854775807"] {
        let (code, _, stderr) = run_cli(home.path(), &["conflicts", "--input", &input, "--tick", tick]);
        assert_eq!(code, 1, "tick {tick} should be rejected");
        assert!(stderr.contains("error:"), "tick {tick}: {stderr}");
        assert!(!stderr.contains("panicked"), "tick {tick}: {stderr}");
    }
}

#[test]
fn test_next_run() {
    let home = TempDir::new().unwrap();
    let rule = write_file(
        &home,
        "rule.json",
        r#"{
            "type": "recurring",
            "start_date": "2026-01-05T00:00:00Z",
            "time": "08:30",
            "recurrence": { "frequency": "weekly", "interval": 1, "days_of_week": [1, 3, 5] }
        }"#,
    );

    let (code, stdout, _) = run_cli(
        home.path(),
        &["next-run", "--rule", &rule, "--now", "2026-03-03T12:00:00Z"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#""2026-03-04T08:30:00Z""#);

    let (code, stdout, _) = run_cli(
        home.path(),
        &["next-run", "--rule", &rule, "--now", "2026-03-03T12:00:00Z", "--count", "3"],
    );
    assert_eq!(code, 0);
    let runs: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        runs,
        vec!["2026-03-04T08:30:00Z", "2026-03-06T08:30:00Z", "2026-03-09T08:30:00Z"]
    );
}

#[test]
fn test_next_run_strict_rejects_malformed_rule() {
    let home = TempDir::new().unwrap();
    let rule = write_file(
        &home,
        "rule.json",
        r#"{
            "type": "recurring",
            "start_date": "2026-01-05T00:00:00Z",
            "recurrence": { "frequency": "weekly", "days_of_week": [] }
        }"#,
    );

    let (code, stdout, _) = run_cli(home.path(), &["next-run", "--rule", &rule]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "null");

    let (code, _, stderr) = run_cli(home.path(), &["next-run", "--rule", &rule, "--strict"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_set_reset() {
    let home = TempDir::new().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "scheduling.focus_block_duration"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "90");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "scheduling.focus_block_duration", "45"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "scheduling.focus_block_duration"]);
    assert_eq!(stdout.trim(), "45");

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "scheduling.energy_level", "150"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "scheduling.focus_block_duration"]);
    assert_eq!(stdout.trim(), "90");
}

#[test]
fn test_missing_input_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.json");
    let (code, _, stderr) = run_cli(home.path(), &["plan", "--input", &missing.to_string_lossy()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Cannot read"));
}
