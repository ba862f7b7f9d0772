//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `runwatch_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use runwatch_common::ApplicationSnapshot;

use crate::domain::RunwatchConfig;

/// How often the default [`ProgressSink::cancelled`] re-checks the flag.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

// ── Sampler Port ──────────────────────────────────────────────────────────────

/// Fetches a fresh point-in-time snapshot of a named application.
///
/// Implementations must not retry internally; one call is one remote read.
#[allow(async_fn_in_trait)]
pub trait Sampler {
    /// Read the desired state and every instance's status for `app_name`.
    async fn fetch_snapshot(&self, app_name: &str) -> Result<ApplicationSnapshot>;
}

// ── Progress Port ─────────────────────────────────────────────────────────────

/// Progress reporting plus the caller's cancellation signal.
///
/// Purely observational apart from cancellation; the tracker behaves the same
/// against [`NoopProgress`].
#[allow(async_fn_in_trait)]
pub trait ProgressSink {
    /// Start a task of roughly `total_units` units.
    fn begin(&self, description: &str, total_units: u64);
    /// Replace the human-readable status line.
    fn set_status(&self, text: &str);
    /// Record `units` units of work done.
    fn tick(&self, units: u64);
    /// Whether the caller has asked to stop.
    fn is_cancelled(&self) -> bool;

    /// Resolves once cancellation has been requested.
    ///
    /// The default re-checks [`ProgressSink::is_cancelled`] every
    /// [`CANCEL_POLL_INTERVAL`]; sinks with a native signal should override it.
    async fn cancelled(&self) {
        while !self.is_cancelled() {
            tokio::time::sleep(CANCEL_POLL_INTERVAL).await;
        }
    }
}

/// Progress sink that reports nothing and is never cancelled.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn begin(&self, _: &str, _: u64) {}
    fn set_status(&self, _: &str) {}
    fn tick(&self, _: u64) {}
    fn is_cancelled(&self) -> bool {
        false
    }
    async fn cancelled(&self) {
        std::future::pending::<()>().await;
    }
}

// ── Log Port ──────────────────────────────────────────────────────────────────

/// Severity of a [`LogSink`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Fire-and-forget message sink. Never affects control flow.
pub trait LogSink {
    fn record(&self, message: &str, severity: Severity);
}

/// Log sink that drops every record.
pub struct NoopLog;

impl LogSink for NoopLog {
    fn record(&self, _: &str, _: Severity) {}
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none is stored.
    fn load(&self) -> Result<RunwatchConfig>;
    /// Persist the configuration.
    fn save(&self, config: &RunwatchConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}
