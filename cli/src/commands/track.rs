//! `runwatch track` — wait until an application reports running.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::run_state_tracker::{
    RunStateTracker, TrackOutcome, TrackerConfig,
};
use crate::commands::SamplerArgs;
use crate::domain::{RunwatchConfig, TrackError};
use crate::output::{TerminalLog, TerminalProgress};

/// Exit status when the budget ran out before the application came up.
pub const EXIT_TIMED_OUT: u8 = 2;

/// Exit status after Ctrl-C, following the shell's `128 + SIGINT`.
pub const EXIT_CANCELLED: u8 = 130;

/// Arguments for the track command.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Application to wait for
    pub app: String,

    /// Give up after this many seconds [default: tracker.timeout_secs]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Delay between polls in milliseconds [default: tracker.poll_interval_ms]
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

impl TrackArgs {
    fn apply_overrides(&self, config: &mut RunwatchConfig) {
        if let Some(secs) = self.timeout {
            config.tracker.timeout_secs = secs;
        }
        if let Some(ms) = self.interval {
            config.tracker.poll_interval_ms = ms;
        }
    }
}

/// Run the track command.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the sampler command
/// is empty, or a fetch fails.
pub async fn run(app: &AppContext, args: TrackArgs) -> Result<ExitCode> {
    let mut config = config_service::load_config(&app.config_store)?;
    args.apply_overrides(&mut config);
    let sampler = args.sampler.build(app, &config.sampler)?;

    let cancel = CancellationToken::new();
    let interrupt = cancel_on_ctrl_c(cancel.clone());
    let progress = TerminalProgress::new(&app.output, cancel);
    let log = TerminalLog::new(&app.output).above(progress.bar());

    let result = RunStateTracker::new(&args.app, &sampler, &log)
        .with_config(TrackerConfig::from(&config.tracker))
        .track(&progress)
        .await;
    interrupt.abort();
    progress.finish();

    match result {
        Ok(outcome) => {
            app.renderer().render_track(&args.app, Some(outcome))?;
            Ok(exit_code(outcome))
        }
        Err(TrackError::Cancelled) => {
            app.renderer().render_track(&args.app, None)?;
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        Err(e) => Err(e.into()),
    }
}

/// Map a finished run to the process exit status.
#[must_use]
pub fn exit_code(outcome: TrackOutcome) -> ExitCode {
    match outcome {
        TrackOutcome::Succeeded(_) => ExitCode::SUCCESS,
        TrackOutcome::TimedOut(_) => ExitCode::from(EXIT_TIMED_OUT),
    }
}

fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling");
            token.cancel();
        }
    })
}
