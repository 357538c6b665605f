//! Shared integration-test harness for running the `tempocue` binary as a
//! child process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Runs `tempocue` with `args` and waits for it to exit.
///
/// Logging is forced off so stderr carries only command output.
pub fn spawn_command(args: &[&str]) -> Output {
    spawn_command_with_env(args, &[])
}

/// Like [`spawn_command`], with extra environment variables set.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command_with_env(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tempocue"))
        .args(args)
        .env_remove("TEMPOCUE_LOG_LEVEL")
        .env_remove("TEMPOCUE_PLAN")
        .env_remove("TEMPOCUE_COLOR")
        .env("NO_COLOR", "1")
        .envs(envs.iter().copied())
        .output()
        .expect("failed to run tempocue")
}

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Lossy stdout of a finished command.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished command.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
