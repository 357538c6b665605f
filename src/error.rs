//! Error types for `tempocue`
//!
//! The tempo engine itself only fails at parse time ([`ParseError`]).
//! Everything else here belongs to the surrounding CLI: plan loading,
//! usage mistakes, and I/O.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `tempocue` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid plan YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Tempo notation could not be parsed
    pub const PARSE_ERROR: i32 = 4;

    /// Usage error (invalid arguments, unknown preset or exercise)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `tempocue` operations.
///
/// Aggregates the domain errors and maps each one to an exit code.
#[derive(Debug, Error)]
pub enum TempoCueError {
    /// Tempo notation parse failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Plan loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TempoCueError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) => ExitCode::PARSE_ERROR,
            Self::Config(ConfigError::Unreadable { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Tempo Parse Error
// ============================================================================

/// Tempo notation did not decompose into four valid fields.
///
/// Raised synchronously by [`TempoSpec::parse`](crate::tempo::TempoSpec::parse).
/// An engine is never built from input that produced this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tempo '{input}': {reason}")]
pub struct ParseError {
    /// The notation as supplied by the caller
    pub input: String,
    /// What was wrong with it
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub(crate) fn new(input: &str, reason: ParseErrorReason) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }
}

/// Why a tempo notation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    /// Notation did not have exactly four slash-separated fields
    #[error("expected 4 fields separated by '/', found {0}")]
    FieldCount(usize),

    /// A field was neither the hold marker nor a non-negative integer
    #[error("field {position} ('{token}') is neither 'H' nor a whole number of seconds")]
    InvalidField {
        /// 1-based field position
        position: usize,
        /// The offending token, trimmed
        token: String,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Workout plan loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the plan file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Plan validation failed
    #[error("validation failed for {path}: {}", summarize(.errors))]
    ValidationError {
        /// Path to the plan file
        path: String,
        /// Validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced plan file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Plan file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// Path to the plan file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced with `${VAR:?message}` is not set
    #[error("environment variable '{var}' not set ({location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Message supplied in the reference
        location: String,
    },
}

fn summarize(errors: &[ValidationIssue]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found in a workout plan.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "exercises[2].tempo")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Prevents the plan from being used
    Error,
    /// Reported, but the plan still loads
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `tempocue` operations.
pub type Result<T> = std::result::Result<T, TempoCueError>;

// ============================================================================
// Tests
// ============================================================================
