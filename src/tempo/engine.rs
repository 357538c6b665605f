//! Tempo phase engine.
//!
//! The `TempoEngine` owns one [`TimerState`] and advances it one second per
//! [`tick`](TempoEngine::tick). It never waits on its own; a host (the
//! [`TickDriver`](crate::driver::TickDriver), a test, or any other clock)
//! decides when a second has passed.

use std::fmt;

use tracing::{debug, trace};

use crate::error::ParseError;

use super::notation::TempoSpec;
use super::phase::TempoPhase;
use super::state::{PhaseTransition, TimerState};

/// Listener notified when the engine changes phase.
///
/// Called synchronously after the phase is updated, once per change.
/// Countdown decrements within a phase are not reported.
pub trait PhaseObserver {
    /// Receives the phase the engine just entered.
    fn phase_changed(&mut self, phase: TempoPhase);
}

impl<F> PhaseObserver for F
where
    F: FnMut(TempoPhase),
{
    fn phase_changed(&mut self, phase: TempoPhase) {
        self(phase);
    }
}

/// Four-phase tempo timer with repetition counting.
///
/// Cycle: eccentric → pause → concentric → pause → eccentric, counting one
/// repetition on each wrap. Hold-marked phases count down from zero and
/// therefore advance on the next tick. The engine runs until
/// [`reset`](Self::reset); it has no stop condition of its own.
pub struct TempoEngine {
    spec: TempoSpec,
    state: TimerState,
    observer: Option<Box<dyn PhaseObserver + Send>>,
}

impl TempoEngine {
    /// Creates an idle engine for an already parsed tempo.
    #[must_use]
    pub const fn new(spec: TempoSpec) -> Self {
        Self {
            spec,
            state: TimerState::new(),
            observer: None,
        }
    }

    /// Parses `notation` and creates an idle engine for it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the notation is invalid; no engine exists
    /// for invalid input.
    pub fn from_notation(notation: &str) -> Result<Self, ParseError> {
        TempoSpec::parse(notation).map(Self::new)
    }

    /// Registers `observer`, replacing any previous one.
    #[must_use]
    pub fn with_observer(mut self, observer: impl PhaseObserver + Send + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    /// Registers `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl PhaseObserver + Send + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the registered observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Starts the first repetition.
    ///
    /// From idle: enters eccentric with its duration loaded and the
    /// repetition count at 1. Ignored while already running.
    pub fn start(&mut self) -> Option<PhaseTransition> {
        if self.state.phase.is_running() {
            debug!(phase = %self.state.phase, "start ignored, engine already running");
            return None;
        }

        self.state.repetition_count = 1;
        let transition = self.enter(TempoPhase::Eccentric, false);
        debug!(tempo = %self.spec, "tempo started");
        Some(transition)
    }

    /// Advances the timer by one second.
    ///
    /// Decrements the countdown if time is left in the phase, otherwise
    /// moves to the next phase. Returns the transition if the phase changed.
    /// Does nothing while idle.
    pub fn tick(&mut self) -> Option<PhaseTransition> {
        let next = self.state.phase.next()?;

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            return None;
        }

        let wrapped = next == TempoPhase::Eccentric;
        if wrapped {
            self.state.repetition_count = self.state.repetition_count.saturating_add(1);
        }
        Some(self.enter(next, wrapped))
    }

    /// Returns to idle with the countdown and repetition count cleared.
    ///
    /// Safe to call from any phase, any number of times.
    pub fn reset(&mut self) -> Option<PhaseTransition> {
        let was_running = self.state.phase.is_running();
        self.state.remaining_seconds = 0;
        self.state.repetition_count = 0;

        if !was_running {
            return None;
        }

        let transition = self.enter(TempoPhase::Idle, false);
        debug!("tempo reset");
        Some(transition)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TempoPhase {
        self.state.phase
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Current repetition number.
    #[must_use]
    pub const fn repetition_count(&self) -> u32 {
        self.state.repetition_count
    }

    /// Snapshot of the full timer state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// The tempo this engine runs.
    #[must_use]
    pub const fn spec(&self) -> &TempoSpec {
        &self.spec
    }

    /// Returns `true` between `start` and `reset`.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.phase.is_running()
    }

    /// Sets the phase, loads its countdown, then notifies the observer.
    fn enter(&mut self, to: TempoPhase, completed_repetition: bool) -> PhaseTransition {
        let from = self.state.phase;
        self.state.phase = to;
        self.state.remaining_seconds = to
            .duration_in(&self.spec)
            .map_or(0, |d| d.countdown_seconds());

        trace!(
            %from,
            %to,
            remaining = self.state.remaining_seconds,
            repetition = self.state.repetition_count,
            "phase change"
        );

        if let Some(observer) = self.observer.as_mut() {
            observer.phase_changed(to);
        }

        PhaseTransition {
            from,
            to,
            repetition_count: self.state.repetition_count,
            completed_repetition,
        }
    }
}

impl fmt::Debug for TempoEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempoEngine")
            .field("spec", &self.spec.to_string())
            .field("state", &self.state)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
