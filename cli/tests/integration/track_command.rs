//! Integration tests for `runwatch track` and `runwatch state` against
//! scripted sampler commands.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const APP: &str = "orders-api";

fn runwatch(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("runwatch"));
    cmd.env("NO_COLOR", "1")
        .env("RUNWATCH_CONFIG", dir.path().join("config.yaml"));
    cmd
}

/// Write a sampler script that prints `body` for [`APP`] and fails for any
/// other application name. Returns the `--command` value.
fn sampler(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("sampler.sh");
    let script = format!(
        "#!/bin/sh\n[ \"$1\" = \"{APP}\" ] || {{ echo \"unexpected app $1\" >&2; exit 9; }}\n{body}\n"
    );
    std::fs::write(&path, script).expect("write sampler");
    format!("sh {}", path.display())
}

fn snapshot(instances: &[&str]) -> String {
    let list = instances
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("echo '{{\"desired_state\":\"STARTED\",\"instances\":[{list}]}}'")
}

// ── track ─────────────────────────────────────────────────────────────────────

#[test]
fn test_track_running_app_succeeds() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING", "RUNNING"]));
    runwatch(&dir)
        .args(["track", APP, "--command", &command])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Application appears to have started - orders-api",
        ))
        .stdout(predicate::str::contains("orders-api is running"));
}

#[test]
fn test_track_json_reports_outcome() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING", "FLAPPING"]));
    let output = runwatch(&dir)
        .args(["--json", "track", APP, "--command", &command])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["app"], APP);
    assert_eq!(value["outcome"], "succeeded");
    assert_eq!(value["run_state"], "flapping");
}

#[test]
fn test_track_crashed_app_times_out_with_exit_two() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING", "CRASHED"]));
    runwatch(&dir)
        .args([
            "track", APP, "--timeout", "1", "--interval", "200", "--command", &command,
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Timed out waiting for application - orders-api to start",
        ))
        .stdout(predicate::str::contains("crashed"));
}

#[test]
fn test_track_zero_timeout_never_runs_sampler() {
    let dir = TempDir::new().unwrap();
    runwatch(&dir)
        .args([
            "track",
            APP,
            "--timeout",
            "0",
            "--command",
            "/nonexistent/runwatch-sampler",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_track_sampler_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, "echo 'platform unavailable' >&2\nexit 3");
    runwatch(&dir)
        .args(["track", APP, "--command", &command])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Failed to fetch instance stats for 'orders-api'",
        ))
        .stderr(predicate::str::contains("platform unavailable"));
}

#[test]
fn test_state_missing_sampler_reports_spawn_cause() {
    let dir = TempDir::new().unwrap();
    runwatch(&dir)
        .args(["state", APP, "--command", "/nonexistent/runwatch-sampler"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Failed to fetch instance stats for 'orders-api'",
        ))
        .stderr(predicate::str::contains(
            "failed to spawn /nonexistent/runwatch-sampler",
        ));
}

#[test]
fn test_track_quiet_timeout_still_warns_on_stderr() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["STARTING"]));
    runwatch(&dir)
        .args([
            "track", APP, "-q", "--timeout", "1", "--interval", "200", "--command", &command,
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Timed out waiting for application - orders-api to start",
        ));
}

#[test]
fn test_track_json_timeout_keeps_stdout_json_and_warns_on_stderr() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["STARTING"]));
    let output = runwatch(&dir)
        .args([
            "--json", "track", APP, "--timeout", "1", "--interval", "200", "--command", &command,
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "timed_out");
    assert_eq!(value["run_state"], "starting");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Timed out waiting"), "got: {stderr}");
}

#[test]
fn test_track_uses_configured_sampler() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING"]));
    runwatch(&dir)
        .args(["config", "set", "sampler.command", &command])
        .assert()
        .success();
    runwatch(&dir).args(["track", APP]).assert().success();
}

// ── state ─────────────────────────────────────────────────────────────────────

#[test]
fn test_state_prints_aggregated_state() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING", "STARTING"]));
    runwatch(&dir)
        .args(["state", APP, "--command", &command])
        .assert()
        .success()
        .stdout(predicate::str::contains("State:"))
        .stdout(predicate::str::contains("starting"))
        .stdout(predicate::str::contains("2 (1 starting, 1 running)"));
}

#[test]
fn test_state_quiet_prints_bare_run_state() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["RUNNING", "CRASHED"]));
    runwatch(&dir)
        .args(["state", APP, "-q", "--command", &command])
        .assert()
        .success()
        .stdout("crashed\n");
}

#[test]
fn test_state_json_includes_raw_instances() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, &snapshot(&["DOWN", "SOMETHING_NEW"]));
    let output = runwatch(&dir)
        .args(["state", APP, "--json", "--command", &command])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["desired_state"], "STARTED");
    assert_eq!(value["instances"][0], "DOWN");
    assert_eq!(value["instances"][1], "UNKNOWN");
    assert_eq!(value["run_state"], "inactive");
}

#[test]
fn test_state_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let command = sampler(&dir, "echo 'not json'");
    runwatch(&dir)
        .args(["--json", "state", APP, "--command", &command])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("REMOTE_FAILURE"));
}
