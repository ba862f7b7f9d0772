//! Application-level run state and the merge lattice used to combine
//! per-instance states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Health classification of a whole application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Unknown,
    Inactive,
    Starting,
    Running,
    Flapping,
    Crashed,
}

impl RunState {
    /// Every variant, lowest severity first.
    pub const ALL: [RunState; 6] = [
        RunState::Unknown,
        RunState::Inactive,
        RunState::Running,
        RunState::Starting,
        RunState::Flapping,
        RunState::Crashed,
    ];

    /// Whether the application counts as up: steadily running or flapping.
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, RunState::Running | RunState::Flapping)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunState::Unknown => "unknown",
            RunState::Inactive => "inactive",
            RunState::Starting => "starting",
            RunState::Running => "running",
            RunState::Flapping => "flapping",
            RunState::Crashed => "crashed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity rank of a run state. The most alarming state observed across
/// instances wins a merge, so a single crashed instance is never hidden
/// behind healthy ones.
///
/// | state    | rank |
/// |----------|------|
/// | Crashed  | 5    |
/// | Flapping | 4    |
/// | Starting | 3    |
/// | Running  | 2    |
/// | Inactive | 1    |
/// | Unknown  | 0    |
#[must_use]
pub const fn severity(state: RunState) -> u8 {
    match state {
        RunState::Unknown => 0,
        RunState::Inactive => 1,
        RunState::Running => 2,
        RunState::Starting => 3,
        RunState::Flapping => 4,
        RunState::Crashed => 5,
    }
}

/// Combine the state accumulated so far with one more sample.
///
/// Returns whichever operand has the higher [`severity`]. The operator is
/// commutative, associative and idempotent, and `Unknown` is its identity,
/// so a fold seeded with `Unknown` does not depend on instance order.
#[must_use]
pub const fn merge(current: RunState, sample: RunState) -> RunState {
    if severity(sample) > severity(current) {
        sample
    } else {
        current
    }
}
