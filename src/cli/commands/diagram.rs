//! Diagram generation command handler.

use std::fs;

use crate::cli::args::DiagramArgs;
use crate::cli::commands::presets;
use crate::diagram;
use crate::error::TempoCueError;
use crate::tempo::TempoSpec;

/// Execute the diagram command.
///
/// Renders the cycle of a tempo (given as notation or a preset name) as a
/// Mermaid state diagram.
///
/// # Errors
///
/// Returns an error if the tempo is invalid, the preset is unknown, or the
/// output file cannot be written.
pub fn run(args: &DiagramArgs) -> Result<(), TempoCueError> {
    let spec = match (&args.tempo, &args.preset) {
        (Some(notation), _) => TempoSpec::parse(notation)?,
        (None, Some(name)) => presets::resolve(name)?.spec()?,
        (None, None) => {
            return Err(TempoCueError::Usage(
                "either a tempo or --preset is required".to_string(),
            ));
        }
    };

    let rendered = diagram::render_cycle(&spec);

    if let Some(ref output_path) = args.output {
        fs::write(output_path, &rendered).map_err(|e| {
            TempoCueError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to write {}: {e}", output_path.display()),
            ))
        })?;
        eprintln!("Wrote diagram to {}", output_path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
