//! Workout plan loader
//!
//! Loading pipeline:
//! 1. Size check and UTF-8 BOM stripping
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing into a typed `WorkoutPlan`
//! 4. Validation
//! 5. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use crate::config::schema::WorkoutPlan;
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the plan loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for plan size.
    pub limits: PlanLimits,
}

/// Limits for plan files to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct PlanLimits {
    /// Maximum plan file size in bytes.
    pub max_plan_size: usize,

    /// Maximum number of exercises.
    pub max_exercises: usize,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_plan_size: env_or("TEMPOCUE_MAX_PLAN_SIZE", 1024 * 1024),
            max_exercises: env_or("TEMPOCUE_MAX_EXERCISES", 200),
        }
    }
}

/// Result of loading a plan file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated plan.
    pub plan: Arc<WorkoutPlan>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during plan loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Workout plan loader.
#[derive(Debug, Default)]
pub struct PlanLoader {
    options: LoaderOptions,
}

impl PlanLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads, validates, and freezes a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing or larger than the size limit
    /// - A required environment variable is unset
    /// - YAML parsing fails
    /// - Validation finds errors
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.limits.max_plan_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.limits.max_plan_size),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;

        self.load_from_str(&raw, path)
    }

    /// Loads a plan from YAML text; `path` is used for error messages.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file checks.
    pub fn load_from_str(&self, raw: &str, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let substituted = expand_env(raw, path, &mut warnings)?;

        if substituted.trim().is_empty() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Plan file is empty".to_string(),
            });
        }

        let plan: WorkoutPlan =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        let result = Validator::new().validate(&plan, &self.options.limits);
        if !result.is_valid() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: result.errors,
            });
        }

        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(LoadResult {
            plan: Arc::new(plan),
            warnings,
        })
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// What to do when a referenced variable is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback<'a> {
    /// `${VAR}`: substitute nothing and warn
    Empty,
    /// `${VAR:-default}`
    Default(&'a str),
    /// `${VAR:?message}`: refuse to load
    Required(&'a str),
}

/// Body of one `${...}` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EnvReference<'a> {
    name: &'a str,
    fallback: Fallback<'a>,
}

impl<'a> EnvReference<'a> {
    /// Splits at the first `:-` or `:?`; anything else is part of the name.
    fn parse(body: &'a str) -> Self {
        for (i, _) in body.match_indices(':') {
            let tail = &body[i + 1..];
            let fallback = if let Some(default) = tail.strip_prefix('-') {
                Fallback::Default(default)
            } else if let Some(message) = tail.strip_prefix('?') {
                Fallback::Required(message)
            } else {
                continue;
            };
            return Self {
                name: &body[..i],
                fallback,
            };
        }
        Self {
            name: body,
            fallback: Fallback::Empty,
        }
    }

    fn resolve(self, path: &Path, warnings: &mut Vec<LoadWarning>) -> Result<String, ConfigError> {
        if let Ok(value) = std::env::var(self.name) {
            return Ok(value);
        }
        match self.fallback {
            Fallback::Default(default) => Ok(default.to_owned()),
            Fallback::Required(message) => Err(ConfigError::EnvVarNotSet {
                var: self.name.to_owned(),
                location: message.to_owned(),
            }),
            Fallback::Empty => {
                warnings.push(LoadWarning {
                    message: format!("${{{}}} is not set; substituted an empty string", self.name),
                    location: Some(path.display().to_string()),
                });
                Ok(String::new())
            }
        }
    }
}

/// Expands `${...}` references and `$$` escapes in raw plan text.
///
/// Runs before YAML parsing so expanded values are typed by YAML as if
/// they had been written inline. A lone `$` is kept as is.
fn expand_env(
    raw: &str,
    path: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let end = closing_brace(body).ok_or_else(|| unclosed(path, body))?;
            out.push_str(&EnvReference::parse(&body[..end]).resolve(path, warnings)?);
            rest = &body[end + 1..];
        } else {
            out.push('$');
            rest = after;
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Byte offset of the `}` closing an already opened `${`, counting nested
/// braces in defaults.
fn closing_brace(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in body.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn unclosed(path: &Path, body: &str) -> ConfigError {
    let snippet: String = body.chars().take(32).collect();
    ConfigError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("unclosed environment reference '${{{snippet}'"),
    }
}

/// Only `NotFound` means a missing plan; anything else is an I/O failure.
fn read_error(path: &Path, err: std::io::Error) -> ConfigError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ConfigError::MissingFile {
            path: path.to_path_buf(),
        }
    } else {
        ConfigError::Unreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Parses an environment variable, falling back to `default`.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
