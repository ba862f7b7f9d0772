//! `runwatch state` — read an application's run state once.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::run_state_probe::probe_run_state;
use crate::commands::SamplerArgs;
use crate::output::progress;

/// Arguments for the state command.
#[derive(Args, Debug)]
pub struct StateArgs {
    /// Application to inspect
    pub app: String,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

/// Run the state command.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the fetch fails.
pub async fn run(app: &AppContext, args: StateArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let sampler = args.sampler.build(app, &config.sampler)?;

    let pb = app
        .output
        .show_progress()
        .then(|| progress::fetch_spinner(&args.app));
    let result = probe_run_state(&sampler, &args.app).await;
    if let Some(pb) = &pb {
        progress::settle_fetch(pb, result.is_ok());
    }

    let probe = result?;
    app.renderer().render_probe(&args.app, &probe)?;
    Ok(ExitCode::SUCCESS)
}
