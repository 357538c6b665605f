//! Diagnostic logging for `tempocue`.
//!
//! Logs go to stderr so stdout stays reserved for cues and command output.
//! `TEMPOCUE_LOG_LEVEL` takes any `EnvFilter` directive and overrides `-v`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable that overrides the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "TEMPOCUE_LOG_LEVEL";

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain text, colored when the terminal allows it.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

/// Level directive for a `-v` count: warn, info, debug, then trace.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Whether human-format logs should carry ANSI escapes.
fn ansi_enabled(color: ColorChoice, stderr_is_tty: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stderr_is_tty && !no_color,
    }
}

/// Installs the global subscriber.
///
/// A second call is a no-op: the subscriber is installed with `try_init`
/// and the error from an existing one is ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    // module paths only help once debugging
    let with_target = verbosity >= 2;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(with_target)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Human => {
            let ansi = ansi_enabled(
                color,
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            builder.with_ansi(ansi).try_init()
        }
        LogFormat::Json => builder.json().try_init(),
    };
    let _ = installed;
}
