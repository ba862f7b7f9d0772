//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed object on
//! stdout. Failures use the error object from [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::services::run_state_probe::ProbeResult;
use crate::application::services::run_state_tracker::TrackOutcome;
use crate::domain::RunwatchConfig;

/// Renders command results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print the end of a `track` run.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_track(&self, app_name: &str, outcome: Option<TrackOutcome>) -> Result<()> {
        print(&track_json(app_name, outcome))
    }

    /// Print a one-shot probe.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_probe(&self, app_name: &str, probe: &ProbeResult) -> Result<()> {
        print(&probe_json(app_name, probe))
    }

    /// Print the effective configuration and where it lives.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &RunwatchConfig, path: &Path) -> Result<()> {
        let obj = json!({
            "path": path.display().to_string(),
            "config": config,
        });
        print(&obj)
    }
}

/// `{"app", "outcome", "run_state"}`; `run_state` is `null` when cancelled.
#[must_use]
pub fn track_json(app_name: &str, outcome: Option<TrackOutcome>) -> Value {
    let (label, run_state) = match outcome {
        Some(TrackOutcome::Succeeded(s)) => ("succeeded", Some(s)),
        Some(TrackOutcome::TimedOut(s)) => ("timed_out", Some(s)),
        None => ("cancelled", None),
    };
    json!({
        "app": app_name,
        "outcome": label,
        "run_state": run_state,
    })
}

/// `{"app", "desired_state", "instances", "run_state"}` using the platform's
/// spelling for the raw fields.
#[must_use]
pub fn probe_json(app_name: &str, probe: &ProbeResult) -> Value {
    json!({
        "app": app_name,
        "desired_state": probe.snapshot.desired_state,
        "instances": probe.snapshot.instances,
        "run_state": probe.run_state,
    })
}

fn print(value: &Value) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
