//! Tempo notation inspection.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ParseArgs};
use crate::error::TempoCueError;
use crate::tempo::{PhaseDuration, TempoPhase, TempoSpec, display};

#[derive(Debug, Serialize)]
struct ParsedTempo {
    notation: TempoSpec,
    phases: Vec<ParsedPhase>,
    seconds_per_rep: u64,
    has_hold: bool,
}

#[derive(Debug, Serialize)]
struct ParsedPhase {
    phase: TempoPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    seconds: Option<u32>,
    hold: bool,
}

impl From<TempoSpec> for ParsedTempo {
    fn from(spec: TempoSpec) -> Self {
        let phases = TempoPhase::CYCLE
            .iter()
            .zip(spec.fields())
            .map(|(&phase, duration)| ParsedPhase {
                phase,
                seconds: match duration {
                    PhaseDuration::Seconds(n) => Some(n),
                    PhaseDuration::Hold => None,
                },
                hold: duration.is_hold(),
            })
            .collect();

        Self {
            notation: spec,
            phases,
            seconds_per_rep: spec.seconds_per_rep(),
            has_hold: spec.has_hold(),
        }
    }
}

/// Parse a tempo and print its phases.
///
/// # Errors
///
/// Returns a parse error (exit code 4) for invalid notation.
pub fn run(args: &ParseArgs) -> Result<(), TempoCueError> {
    let spec = TempoSpec::parse(&args.tempo)?;
    tracing::debug!(tempo = %spec, "parsed tempo");

    match args.format {
        OutputFormat::Human => {
            println!("{spec}");
            println!("  {}", display::describe(&spec));
            println!("  {}s per rep", spec.seconds_per_rep());
            if spec.has_hold() {
                println!("  hold phases advance on the next tick");
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ParsedTempo::from(spec))?
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let spec = TempoSpec::parse("2/H/1/0").unwrap();
        let value = serde_json::to_value(ParsedTempo::from(spec)).unwrap();
        assert_eq!(value["notation"], "2/H/1/0");
        assert_eq!(value["seconds_per_rep"], 3);
        assert_eq!(value["has_hold"], true);
        assert_eq!(value["phases"][1]["phase"], "pause_after_eccentric");
        assert_eq!(value["phases"][1]["hold"], true);
        assert!(value["phases"][1].get("seconds").is_none());
        assert_eq!(value["phases"][2]["seconds"], 1);
    }
}
