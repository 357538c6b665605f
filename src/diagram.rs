//! Mermaid rendering of a tempo's phase cycle.
//!
//! Generates `stateDiagram-v2` text: one state per running phase, edges
//! labelled with the time spent in the source phase, and the wrap edge
//! back to eccentric marked as the repetition boundary.

use crate::tempo::{PhaseDuration, TempoPhase, TempoSpec};

/// Label on the edge that completes a repetition.
const WRAP_LABEL: &str = "rep++";

/// Renders the cycle of `spec` as a Mermaid state diagram.
#[must_use]
pub fn render_cycle(spec: &TempoSpec) -> String {
    let mut lines = Vec::new();
    lines.push("stateDiagram-v2".to_string());
    lines.push(format!("    [*] --> {}", TempoPhase::Eccentric));

    for phase in TempoPhase::CYCLE {
        let Some(next) = phase.next() else {
            continue;
        };
        let mut label = phase
            .duration_in(spec)
            .map_or_else(String::new, edge_label);
        if next == TempoPhase::Eccentric {
            label = format!("{label}, {WRAP_LABEL}");
        }
        lines.push(format!("    {phase} --> {next} : {label}"));
    }

    lines.push(String::new());
    lines.push(format!("    note right of {}", TempoPhase::Eccentric));
    lines.push(format!("        tempo {spec}"));
    lines.push("        reset returns to idle from any phase".to_string());
    lines.push("    end note".to_string());

    lines.join("\n")
}

fn edge_label(duration: PhaseDuration) -> String {
    match duration {
        PhaseDuration::Seconds(n) => format!("{n}s"),
        PhaseDuration::Hold => "hold".to_string(),
    }
}
