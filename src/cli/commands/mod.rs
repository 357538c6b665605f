//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod diagram;
pub mod parse;
pub mod presets;
pub mod run;
pub mod validate;
pub mod version;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands, PresetsSubcommand};
use crate::error::TempoCueError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` is fired by the signal handler; only `run` observes it.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), TempoCueError> {
    match cli.command {
        Commands::Run(args) => run::run(&args, cli.quiet, cancel).await,
        Commands::Parse(args) => parse::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Presets(cmd) => match cmd.subcommand {
            PresetsSubcommand::List(args) => presets::list(&args),
            PresetsSubcommand::Show(args) => presets::show(&args),
        },
        Commands::Diagram(args) => diagram::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
