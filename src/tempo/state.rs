//! Runtime state of one tempo timer.

use serde::Serialize;

use super::phase::TempoPhase;

/// Mutable state of a single engine.
///
/// Created idle with no repetitions. Only the owning engine mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimerState {
    pub(crate) phase: TempoPhase,
    pub(crate) remaining_seconds: u32,
    pub(crate) repetition_count: u32,
}

impl TimerState {
    /// Idle state with zero repetitions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: TempoPhase::Idle,
            remaining_seconds: 0,
            repetition_count: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TempoPhase {
        self.phase
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Current repetition number: 1 after start, +1 per completed cycle.
    #[must_use]
    pub const fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    /// Repetitions fully completed so far.
    #[must_use]
    pub const fn completed_repetitions(&self) -> u32 {
        self.repetition_count.saturating_sub(1)
    }
}

/// Record of a phase change, returned by the engine operation that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTransition {
    /// Phase before the change
    pub from: TempoPhase,
    /// Phase after the change
    pub to: TempoPhase,
    /// Repetition count after the change
    pub repetition_count: u32,
    /// Set when this transition wrapped the cycle and finished a repetition
    pub completed_repetition: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = TimerState::new();
        assert_eq!(state.phase(), TempoPhase::Idle);
        assert_eq!(state.remaining_seconds(), 0);
        assert_eq!(state.repetition_count(), 0);
        assert_eq!(state, TimerState::default());
    }

    #[test]
    fn test_completed_repetitions() {
        let mut state = TimerState::new();
        assert_eq!(state.completed_repetitions(), 0);
        state.repetition_count = 1;
        assert_eq!(state.completed_repetitions(), 0);
        state.repetition_count = 4;
        assert_eq!(state.completed_repetitions(), 3);
    }
}
