//! Infrastructure implementation of the `Sampler` port.
//!
//! `CommandSampler` shells out to an external program (for example a wrapper
//! around the platform's CLI) that prints one snapshot as JSON on stdout:
//!
//! ```json
//! {"desired_state": "STARTED", "instances": ["RUNNING", "STARTING"]}
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use runwatch_common::ApplicationSnapshot;

use crate::application::ports::{CommandRunner, Sampler};
use crate::domain::{SamplerSettings, split_command};

/// Runs `program args... <app_name>` once per fetch.
pub struct CommandSampler<R> {
    runner: R,
    program: String,
    args: Vec<String>,
    fetch_timeout: Duration,
}

impl<R: CommandRunner> CommandSampler<R> {
    pub fn new(runner: R, program: impl Into<String>, args: Vec<String>, fetch_timeout: Duration) -> Self {
        Self {
            runner,
            program: program.into(),
            args,
            fetch_timeout,
        }
    }

    /// Build a sampler from configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured command is empty.
    pub fn from_settings(runner: R, settings: &SamplerSettings) -> Result<Self> {
        let (program, args) = split_command(&settings.command)?;
        Ok(Self::new(runner, program, args, settings.fetch_timeout()))
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl<R: CommandRunner> Sampler for CommandSampler<R> {
    async fn fetch_snapshot(&self, app_name: &str) -> Result<ApplicationSnapshot> {
        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(app_name);

        let output = self
            .runner
            .run_with_timeout(&self.program, &args, self.fetch_timeout)
            .await
            .with_context(|| format!("running {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        parse_snapshot(&output.stdout)
            .with_context(|| format!("parsing snapshot from {}", self.program))
    }
}

/// Parse the JSON snapshot printed by a sampler command.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid snapshot document.
pub fn parse_snapshot(stdout: &[u8]) -> Result<ApplicationSnapshot> {
    serde_json::from_slice(stdout).context("invalid snapshot JSON")
}
