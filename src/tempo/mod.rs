//! Tempo phase engine
//!
//! Resistance-training tempo timer: a repeating four-phase countdown
//! (eccentric, pause, concentric, pause) with repetition counting.
//!
//! # Architecture
//!
//! - [`TempoSpec`] - Parsed `E/P1/C/P2` notation
//! - [`TempoPhase`] - Phase enum and cycle order
//! - [`TimerState`] - Caller-owned countdown and repetition state
//! - [`TempoEngine`] - State machine driven by explicit ticks
//! - [`display`] - One-line text rendering

pub mod display;
pub mod engine;
pub mod notation;
pub mod phase;
pub mod state;

pub use engine::{PhaseObserver, TempoEngine};
pub use notation::{HOLD_MARKER, PhaseDuration, TempoSpec};
pub use phase::TempoPhase;
pub use state::{PhaseTransition, TimerState};
