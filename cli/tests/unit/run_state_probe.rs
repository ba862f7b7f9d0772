//! Tests for the one-shot run-state probe.

#![allow(clippy::unwrap_used)]

use runwatch_cli::application::services::run_state_probe::probe_run_state;
use runwatch_cli::domain::TrackError;
use runwatch_common::RawInstanceState::{Crashed, Running, Starting};
use runwatch_common::RunState;

use crate::mocks::{ScriptedSampler, Step, started, stopped};

#[tokio::test]
async fn probe_aggregates_one_snapshot() {
    let sampler = ScriptedSampler::always(started(&[Running, Starting]));

    let probe = probe_run_state(&sampler, "orders-api").await.unwrap();

    assert_eq!(probe.run_state, RunState::Starting);
    assert_eq!(probe.snapshot.instances, vec![Running, Starting]);
    assert_eq!(sampler.calls(), 1);
}

#[tokio::test]
async fn probe_does_not_wait_for_running() {
    let sampler = ScriptedSampler::always(started(&[Crashed]));

    let probe = probe_run_state(&sampler, "orders-api").await.unwrap();

    assert_eq!(probe.run_state, RunState::Crashed);
    assert_eq!(sampler.calls(), 1);
}

#[tokio::test]
async fn probe_stopped_application_is_inactive() {
    let sampler = ScriptedSampler::always(stopped());

    let probe = probe_run_state(&sampler, "orders-api").await.unwrap();

    assert_eq!(probe.run_state, RunState::Inactive);
}

#[tokio::test]
async fn probe_failure_is_remote_error() {
    let sampler = ScriptedSampler::new(vec![Step::Fail("timed out")]);

    let err = probe_run_state(&sampler, "orders-api").await.unwrap_err();

    assert!(matches!(err, TrackError::Remote { .. }));
    assert!(err.to_string().contains("orders-api"));
}
