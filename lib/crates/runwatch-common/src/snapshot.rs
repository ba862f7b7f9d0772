//! Point-in-time application snapshots as reported by the platform, and the
//! pure functions that reduce them to a single [`RunState`].

use serde::{Deserialize, Serialize};

use crate::run_state::{RunState, merge};

/// Health of one instance as reported by the platform.
///
/// Status strings the platform adds later deserialize as `Unknown` instead of
/// failing the whole snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawInstanceState {
    Running,
    Crashed,
    Flapping,
    Starting,
    Down,
    #[serde(other)]
    Unknown,
}

impl RawInstanceState {
    /// Status string as the platform spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Crashed => "CRASHED",
            Self::Flapping => "FLAPPING",
            Self::Starting => "STARTING",
            Self::Down => "DOWN",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for RawInstanceState {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => RawInstanceState::Running,
            "CRASHED" => RawInstanceState::Crashed,
            "FLAPPING" => RawInstanceState::Flapping,
            "STARTING" => RawInstanceState::Starting,
            "DOWN" => RawInstanceState::Down,
            _ => RawInstanceState::Unknown,
        }
    }
}

/// Application state declared by the deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesiredState {
    #[default]
    Started,
    Stopped,
    Updating,
}

impl DesiredState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Stopped => "STOPPED",
            Self::Updating => "UPDATING",
        }
    }
}

/// One read of an application: its desired state and the raw state of every
/// instance known at that moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApplicationSnapshot {
    pub desired_state: DesiredState,
    #[serde(default)]
    pub instances: Vec<RawInstanceState>,
}

impl ApplicationSnapshot {
    #[must_use]
    pub fn new(desired_state: DesiredState, instances: Vec<RawInstanceState>) -> Self {
        Self {
            desired_state,
            instances,
        }
    }
}

/// Translate one instance's platform status into a [`RunState`].
#[must_use]
pub const fn map_instance_state(raw: RawInstanceState) -> RunState {
    match raw {
        RawInstanceState::Running => RunState::Running,
        RawInstanceState::Crashed => RunState::Crashed,
        RawInstanceState::Flapping => RunState::Flapping,
        RawInstanceState::Starting => RunState::Starting,
        RawInstanceState::Down => RunState::Inactive,
        RawInstanceState::Unknown => RunState::Unknown,
    }
}

impl From<RawInstanceState> for RunState {
    fn from(raw: RawInstanceState) -> Self {
        map_instance_state(raw)
    }
}

/// Fold a snapshot into one application-level [`RunState`].
///
/// A stopped application with no instances is `Inactive`. Otherwise every
/// instance state is mapped and merged starting from `Unknown`, so an
/// application with no instances and any other desired state is `Unknown`.
#[must_use]
pub fn aggregate(snapshot: &ApplicationSnapshot) -> RunState {
    if snapshot.instances.is_empty() && snapshot.desired_state == DesiredState::Stopped {
        return RunState::Inactive;
    }
    snapshot
        .instances
        .iter()
        .copied()
        .map(map_instance_state)
        .fold(RunState::Unknown, merge)
}
