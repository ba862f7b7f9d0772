//! Application service — one-shot run-state read.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use runwatch_common::{ApplicationSnapshot, RunState, aggregate};

use crate::application::ports::Sampler;
use crate::domain::TrackError;

/// A snapshot together with its aggregated run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub snapshot: ApplicationSnapshot,
    pub run_state: RunState,
}

/// Fetch one snapshot of `app_name` and aggregate it. No polling, no retry.
///
/// # Errors
///
/// Returns [`TrackError::Remote`] if the sampler fails.
pub async fn probe_run_state(
    sampler: &impl Sampler,
    app_name: &str,
) -> Result<ProbeResult, TrackError> {
    let snapshot = sampler
        .fetch_snapshot(app_name)
        .await
        .map_err(|e| TrackError::remote(app_name, e))?;
    let run_state = aggregate(&snapshot);
    tracing::debug!(app = %app_name, instances = snapshot.instances.len(), %run_state, "probed application");
    Ok(ProbeResult {
        snapshot,
        run_state,
    })
}
