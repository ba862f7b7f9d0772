//! Command implementations

pub mod config;
pub mod state;
pub mod track;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::SamplerSettings;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::sampler::CommandSampler;

/// Sampler selection shared by `track` and `state`.
#[derive(Args, Debug, Default)]
pub struct SamplerArgs {
    /// Command printing one snapshot as JSON; the application name is appended
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,
}

impl SamplerArgs {
    /// Build the sampler from configured settings, letting `--command` win.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting command line is empty.
    pub fn build(
        &self,
        app: &AppContext,
        settings: &SamplerSettings,
    ) -> Result<CommandSampler<TokioCommandRunner>> {
        let mut settings = settings.clone();
        if let Some(command) = &self.command {
            settings.command.clone_from(command);
        }
        CommandSampler::from_settings(app.command_runner(), &settings)
    }
}
