//! Version information display
//!
//! Prints the package version and the tempo notation grammar it accepts.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::tempo::HOLD_MARKER;

/// Print version information.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version}");
        }
        OutputFormat::Json => {
            let info = json!({
                "name": name,
                "version": version,
                "notation": "E/P1/C/P2",
                "hold_marker": HOLD_MARKER,
            });
            println!("{info}");
        }
    }
}
