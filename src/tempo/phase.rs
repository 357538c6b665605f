//! The five tempo phases and the fixed order the cycle runs in.

use std::fmt;

use serde::Serialize;

use super::notation::{PhaseDuration, TempoSpec};

/// Phase of a tempo timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoPhase {
    /// Not running.
    #[default]
    Idle,
    /// Lowering the weight.
    Eccentric,
    /// Pause under load before lifting.
    PauseAfterEccentric,
    /// Lifting the weight.
    Concentric,
    /// Pause at the top.
    PauseAfterConcentric,
}

impl TempoPhase {
    /// The four running phases in cycle order.
    pub const CYCLE: [Self; 4] = [
        Self::Eccentric,
        Self::PauseAfterEccentric,
        Self::Concentric,
        Self::PauseAfterConcentric,
    ];

    /// Next phase in the cycle, wrapping back to eccentric.
    ///
    /// `Idle` has no successor; the engine leaves it only through `start`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => None,
            Self::Eccentric => Some(Self::PauseAfterEccentric),
            Self::PauseAfterEccentric => Some(Self::Concentric),
            Self::Concentric => Some(Self::PauseAfterConcentric),
            Self::PauseAfterConcentric => Some(Self::Eccentric),
        }
    }

    /// Configured duration of this phase in `spec`, `None` for idle.
    #[must_use]
    pub const fn duration_in(self, spec: &TempoSpec) -> Option<PhaseDuration> {
        match self {
            Self::Idle => None,
            Self::Eccentric => Some(spec.eccentric),
            Self::PauseAfterEccentric => Some(spec.pause1),
            Self::Concentric => Some(spec.concentric),
            Self::PauseAfterConcentric => Some(spec.pause2),
        }
    }

    /// Machine-readable name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Eccentric => "eccentric",
            Self::PauseAfterEccentric => "pause_after_eccentric",
            Self::Concentric => "concentric",
            Self::PauseAfterConcentric => "pause_after_concentric",
        }
    }

    /// Short coaching cue shown to the athlete.
    #[must_use]
    pub const fn cue(self) -> &'static str {
        match self {
            Self::Idle => "ready",
            Self::Eccentric => "lower",
            Self::PauseAfterEccentric | Self::PauseAfterConcentric => "pause",
            Self::Concentric => "lift",
        }
    }

    /// Returns `true` for every phase except idle.
    #[must_use]
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for TempoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
