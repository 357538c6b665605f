//! CLI argument definitions
//!
//! All Clap derive structs for `tempocue` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Resistance-training tempo timer.
#[derive(Parser, Debug)]
#[command(name = "tempocue", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "TEMPOCUE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the tempo timer with spoken-style cues on stdout.
    Run(RunArgs),

    /// Parse a tempo notation and show its phases.
    Parse(ParseArgs),

    /// Validate workout plan files.
    Validate(ValidateArgs),

    /// List or show built-in tempo presets.
    Presets(PresetsCommand),

    /// Render a tempo's phase cycle as a Mermaid state diagram.
    Diagram(DiagramArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Run Command
// ============================================================================

/// Arguments for `run`.
///
/// With no tempo, preset or `--plan`, the plan comes from `TEMPOCUE_PLAN`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").multiple(false))]
pub struct RunArgs {
    /// Tempo notation, e.g. `3/1/1/0` (use `H` for a hold).
    #[arg(group = "source", allow_hyphen_values = true)]
    pub tempo: Option<String>,

    /// Use a built-in preset instead of notation.
    #[arg(short, long, group = "source")]
    pub preset: Option<String>,

    /// Workout plan file; requires `--exercise` [env: TEMPOCUE_PLAN].
    #[arg(long, group = "source", requires = "exercise")]
    pub plan: Option<PathBuf>,

    /// Exercise within the plan to run.
    #[arg(short, long, conflicts_with_all = ["tempo", "preset"])]
    pub exercise: Option<String>,

    /// Stop after this many completed repetitions.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub reps: Option<u32>,

    /// Tick period (humantime, e.g. `1s`, `750ms`).
    #[arg(long)]
    pub interval: Option<String>,

    /// Ring the terminal bell on every phase change.
    #[arg(long)]
    pub bell: bool,

    /// Do not print cue lines.
    #[arg(long)]
    pub no_cues: bool,

    /// Write JSONL session events to this file (`-` for stderr).
    #[arg(long, env = "TEMPOCUE_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Serve Prometheus metrics on 127.0.0.1:<PORT>.
    #[arg(long, env = "TEMPOCUE_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

// ============================================================================
// Parse / Validate
// ============================================================================

/// Arguments for `parse`.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Tempo notation to parse.
    #[arg(allow_hyphen_values = true)]
    pub tempo: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Plan files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Presets
// ============================================================================

/// Preset commands.
#[derive(Args, Debug)]
pub struct PresetsCommand {
    /// Preset subcommand.
    #[command(subcommand)]
    pub subcommand: PresetsSubcommand,
}

/// Preset subcommands.
#[derive(Subcommand, Debug)]
pub enum PresetsSubcommand {
    /// List built-in presets.
    List(PresetsListArgs),

    /// Show one preset's phases.
    Show(PresetsShowArgs),
}

/// Arguments for `presets list`.
#[derive(Args, Debug)]
pub struct PresetsListArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `presets show`.
#[derive(Args, Debug)]
pub struct PresetsShowArgs {
    /// Preset name.
    pub name: String,
}

// ============================================================================
// Diagram
// ============================================================================

/// Arguments for `diagram`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").required(true).multiple(false))]
pub struct DiagramArgs {
    /// Tempo notation.
    #[arg(group = "source", allow_hyphen_values = true)]
    pub tempo: Option<String>,

    /// Built-in preset name.
    #[arg(short, long, group = "source")]
    pub preset: Option<String>,

    /// Write the diagram to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
