//! Built-in preset listing.

use serde::Serialize;

use crate::cli::args::{OutputFormat, PresetsListArgs, PresetsShowArgs};
use crate::error::TempoCueError;
use crate::presets::{self, TempoPreset};
use crate::tempo::display;

/// JSON shape of one preset.
#[derive(Debug, Serialize)]
struct PresetEntry<'a> {
    name: &'a str,
    notation: &'a str,
    description: &'a str,
    seconds_per_rep: u64,
}

/// List all built-in presets.
///
/// # Errors
///
/// Returns an error if a preset fails to parse or JSON output fails.
pub fn list(args: &PresetsListArgs) -> Result<(), TempoCueError> {
    let all = presets::list_presets();

    match args.format {
        OutputFormat::Human => {
            let width = all.iter().map(|p| p.name.len()).max().unwrap_or(0);
            for preset in all {
                println!(
                    "  {:<width$}  {:<9}  {}",
                    preset.name, preset.notation, preset.description
                );
            }
        }
        OutputFormat::Json => {
            let mut entries = Vec::with_capacity(all.len());
            for preset in all {
                entries.push(PresetEntry {
                    name: preset.name,
                    notation: preset.notation,
                    description: preset.description,
                    seconds_per_rep: preset.spec()?.seconds_per_rep(),
                });
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Show one preset's phases.
///
/// # Errors
///
/// Returns a usage error (with a suggestion, if one is close) for an
/// unknown preset name.
pub fn show(args: &PresetsShowArgs) -> Result<(), TempoCueError> {
    let preset = resolve(&args.name)?;
    let spec = preset.spec()?;

    println!("{} ({})", preset.name, preset.notation);
    println!("  {}", preset.description);
    println!("  {}", display::describe(&spec));
    println!("  {}s per rep", spec.seconds_per_rep());

    Ok(())
}

/// Looks up a preset, turning a miss into a usage error.
pub(crate) fn resolve(name: &str) -> Result<&'static TempoPreset, TempoCueError> {
    presets::find_preset(name).ok_or_else(|| {
        let hint = presets::suggest_preset(name)
            .map(|s| format!("; did you mean '{s}'?"))
            .unwrap_or_default();
        TempoCueError::Usage(format!(
            "unknown preset '{name}'{hint} (see `tempocue presets list`)"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    #[test]
    fn test_resolve_known_preset() {
        assert_eq!(resolve("controlled").unwrap().notation, "3/1/1/0");
    }

    #[test]
    fn test_resolve_unknown_suggests() {
        let err = resolve("controled").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
        assert!(err.to_string().contains("did you mean 'controlled'"));
    }

    #[test]
    fn test_resolve_unknown_without_suggestion() {
        let err = resolve("zzzzzzzzzzzz").unwrap_err();
        assert!(!err.to_string().contains("did you mean"));
    }
}
