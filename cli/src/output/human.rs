//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use runwatch_common::{RawInstanceState, RunState, map_instance_state};

use crate::application::services::run_state_probe::ProbeResult;
use crate::application::services::run_state_tracker::TrackOutcome;
use crate::domain::RunwatchConfig;
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the end of a `track` run. `None` means it was cancelled.
    ///
    /// Warnings about timeouts and flapping instances are already printed by
    /// the log sink while tracking, so this only summarises.
    pub fn render_track(&self, app_name: &str, outcome: Option<TrackOutcome>) {
        match outcome {
            Some(TrackOutcome::Succeeded(state)) => {
                self.ctx
                    .success(&format!("{app_name} is {}", self.state(state)));
            }
            Some(TrackOutcome::TimedOut(state)) => {
                self.ctx.kv("Last state:", &self.state(state));
            }
            None => self.ctx.info(&format!("Stopped tracking {app_name}")),
        }
    }

    /// Render a one-shot probe: desired state, per-state instance counts and
    /// the aggregated run state. Quiet output is the bare run state.
    pub fn render_probe(&self, app_name: &str, probe: &ProbeResult) {
        if self.ctx.quiet {
            println!("{}", probe.run_state);
            return;
        }
        self.ctx.header(app_name);
        self.ctx
            .kv("Desired:", probe.snapshot.desired_state.as_str());
        self.ctx
            .kv("Instances:", &instance_summary(&probe.snapshot.instances));
        self.ctx.kv("State:", &self.state(probe.run_state));
    }

    /// Render the current runwatch configuration.
    pub fn render_config(&self, config: &RunwatchConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!(
            "  {:<30} {}",
            "tracker.timeout_secs:", config.tracker.timeout_secs
        );
        println!(
            "  {:<30} {}",
            "tracker.poll_interval_ms:", config.tracker.poll_interval_ms
        );
        println!("  {:<30} {}", "sampler.command:", config.sampler.command);
        println!(
            "  {:<30} {}",
            "sampler.fetch_timeout_secs:", config.sampler.fetch_timeout_secs
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "NO_COLOR", "RUST_LOG"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    fn state(&self, state: RunState) -> String {
        state
            .as_str()
            .style(self.ctx.styles.run_state(state))
            .to_string()
    }
}

/// `"3 (2 running, 1 starting)"`, or `"none"` for an empty list.
fn instance_summary(instances: &[RawInstanceState]) -> String {
    if instances.is_empty() {
        return "none".to_string();
    }
    let parts: Vec<String> = RunState::ALL
        .iter()
        .rev()
        .filter_map(|&state| {
            let n = instances
                .iter()
                .filter(|raw| map_instance_state(**raw) == state)
                .count();
            (n > 0).then(|| format!("{n} {state}"))
        })
        .collect();
    format!("{} ({})", instances.len(), parts.join(", "))
}
