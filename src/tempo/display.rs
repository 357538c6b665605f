//! Text rendering of a running tempo.
//!
//! Invalid notation renders as an empty string, never a partial line.

use super::engine::TempoEngine;
use super::notation::{PhaseDuration, TempoSpec};
use super::phase::TempoPhase;

/// Cue shown for a hold-marked phase.
pub const HOLD_CUE: &str = "hold as long as possible";

/// Renders the engine's current state as one line.
///
/// Idle engines render as `ready`.
#[must_use]
pub fn render(engine: &TempoEngine) -> String {
    let phase = engine.phase();
    let Some(duration) = phase.duration_in(engine.spec()) else {
        return TempoPhase::Idle.cue().to_owned();
    };

    let timing = match duration {
        PhaseDuration::Hold => HOLD_CUE.to_owned(),
        PhaseDuration::Seconds(_) => format!("{}s", engine.remaining_seconds()),
    };

    format!(
        "rep {} · {} ({}) · {timing}",
        engine.repetition_count(),
        phase.cue(),
        phase
    )
}

/// Describes a tempo notation field by field.
///
/// Returns an empty string if `notation` does not parse.
#[must_use]
pub fn render_notation(notation: &str) -> String {
    TempoSpec::parse(notation).map_or_else(|_| String::new(), |spec| describe(&spec))
}

/// Describes each phase of a parsed tempo.
#[must_use]
pub fn describe(spec: &TempoSpec) -> String {
    let labels = ["eccentric", "pause", "concentric", "pause"];
    labels
        .iter()
        .zip(spec.fields())
        .map(|(label, duration)| match duration {
            PhaseDuration::Seconds(n) => format!("{label} {n}s"),
            PhaseDuration::Hold => format!("{label} hold"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
