//! Application service — wait for an application to report running.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use runwatch_common::{RunState, aggregate};
use tokio::time::Instant;

use crate::application::ports::{LogSink, ProgressSink, Sampler, Severity};
use crate::domain::{TrackError, TrackerSettings};

/// Total budget when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Delay between two snapshots when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Rough cost of one remote fetch. Only used to size the progress task.
pub const DEFAULT_FETCH_ESTIMATE: Duration = Duration::from_secs(5);

/// Stand-in deadline distance for budgets too large to represent.
const UNBOUNDED: Duration = Duration::from_secs(60 * 60 * 24 * 365);

const TASK_NAME: &str = "Checking if the application is running";
const FETCHING: &str = "Fetching application instances to verify if application is running.";

/// Timing parameters for one tracking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Total budget, measured on the monotonic clock from the start of `track`.
    pub timeout: Duration,
    /// Delay between the end of one poll and the next fetch.
    pub poll_interval: Duration,
    /// Expected duration of one fetch.
    pub fetch_estimate: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch_estimate: DEFAULT_FETCH_ESTIMATE,
        }
    }
}

impl From<&TrackerSettings> for TrackerConfig {
    fn from(settings: &TrackerSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            poll_interval: settings.poll_interval(),
            ..Self::default()
        }
    }
}

impl TrackerConfig {
    /// Number of polls expected to fit in the budget, never less than one.
    #[must_use]
    pub fn estimated_attempts(&self) -> u64 {
        let per_attempt = (self.poll_interval + self.fetch_estimate).as_millis();
        if per_attempt == 0 {
            return 1;
        }
        u64::try_from(self.timeout.as_millis() / per_attempt)
            .unwrap_or(u64::MAX)
            .max(1)
    }
}

/// How a tracking run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The application reached `Running` or `Flapping`.
    Succeeded(RunState),
    /// The budget ran out; carries the last aggregated state (`Unknown` if
    /// no snapshot was read).
    TimedOut(RunState),
}

impl TrackOutcome {
    #[must_use]
    pub fn run_state(self) -> RunState {
        match self {
            Self::Succeeded(s) | Self::TimedOut(s) => s,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Polls one application until it is up, the budget runs out, or the
/// caller cancels.
///
/// Single use: [`RunStateTracker::track`] consumes the tracker.
pub struct RunStateTracker<'a, S, L> {
    app_name: String,
    sampler: &'a S,
    log: &'a L,
    config: TrackerConfig,
}

impl<'a, S: Sampler, L: LogSink> RunStateTracker<'a, S, L> {
    pub fn new(app_name: impl Into<String>, sampler: &'a S, log: &'a L) -> Self {
        Self {
            app_name: app_name.into(),
            sampler,
            log,
            config: TrackerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run the poll loop.
    ///
    /// Each iteration checks the deadline, then cancellation, then fetches
    /// one snapshot (bounded by the deadline) and aggregates it. Between
    /// polls the tracker waits for the poll interval or until cancelled,
    /// whichever comes first. At most one fetch is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Cancelled`] when `progress` reports cancellation,
    /// and [`TrackError::Remote`] on the first sampler failure.
    pub async fn track(self, progress: &impl ProgressSink) -> Result<TrackOutcome, TrackError> {
        let start = Instant::now();
        let deadline = start
            .checked_add(self.config.timeout)
            .unwrap_or_else(|| start + UNBOUNDED);
        let mut run_state = RunState::Unknown;
        let mut attempt: u64 = 0;

        progress.begin(TASK_NAME, self.config.estimated_attempts());
        self.log
            .record(&format!("{FETCHING} Please wait..."), Severity::Info);

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(self.timed_out(run_state));
            }
            if progress.is_cancelled() {
                tracing::debug!(app = %self.app_name, attempt, "tracking cancelled");
                return Err(TrackError::Cancelled);
            }
            progress.set_status(&format!("{FETCHING} Time left: {}s", remaining.as_secs()));

            attempt += 1;
            let fetch = self.sampler.fetch_snapshot(&self.app_name);
            let snapshot = match tokio::time::timeout_at(deadline, fetch).await {
                Ok(Ok(snapshot)) => snapshot,
                Ok(Err(e)) => return Err(TrackError::remote(&self.app_name, e)),
                Err(_) => {
                    tracing::debug!(app = %self.app_name, attempt, "fetch cut off by deadline");
                    return Ok(self.timed_out(run_state));
                }
            };
            progress.tick(1);

            run_state = aggregate(&snapshot);
            tracing::debug!(
                app = %self.app_name,
                attempt,
                instances = snapshot.instances.len(),
                %run_state,
                "polled application",
            );

            if run_state.is_up() {
                return Ok(self.succeeded(run_state));
            }

            let wait = self
                .config
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now()));
            tokio::select! {
                biased;
                () = progress.cancelled() => {
                    tracing::debug!(app = %self.app_name, attempt, "tracking cancelled while waiting");
                    return Err(TrackError::Cancelled);
                }
                () = tokio::time::sleep(wait) => {}
            }
        }
    }

    fn succeeded(&self, run_state: RunState) -> TrackOutcome {
        let app = &self.app_name;
        self.log.record(
            &format!("Application appears to have started - {app}"),
            Severity::Info,
        );
        if run_state == RunState::Flapping {
            self.log.record(
                &format!("Application - {app} is up but its instances are flapping between ready and unready."),
                Severity::Warning,
            );
        }
        TrackOutcome::Succeeded(run_state)
    }

    fn timed_out(&self, run_state: RunState) -> TrackOutcome {
        let app = &self.app_name;
        self.log.record(
            &format!(
                "Timed out waiting for application - {app} to start (last state: {run_state}). \
                 Please wait and manually refresh, or check if the application logs show any errors."
            ),
            Severity::Warning,
        );
        TrackOutcome::TimedOut(run_state)
    }
}
