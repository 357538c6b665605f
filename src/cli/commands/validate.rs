//! Workout plan validation command.
//!
//! Loads every file, reports all of them, and fails if any is invalid.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{LoadWarning, PlanLoader};
use crate::error::{ConfigError, Severity, TempoCueError, ValidationIssue};

/// Outcome for one plan file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<String>,
    exercises: usize,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

/// Validate plan files without running a session.
///
/// # Errors
///
/// Returns a config error (exit code 2) naming the first invalid file.
/// With `--strict`, warnings make a file invalid.
pub fn run(args: &ValidateArgs) -> Result<(), TempoCueError> {
    let loader = PlanLoader::default();
    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_failure: Option<ConfigError> = None;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating plan");
        let (report, failure) = check_file(&loader, path, args.strict);
        if !report.valid {
            tracing::warn!(file = %path.display(), errors = report.errors.len(), "plan invalid");
        }
        if first_failure.is_none() {
            first_failure = failure;
        }
        reports.push(report);
    }

    match args.format {
        OutputFormat::Human => print_human(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    first_failure.map_or(Ok(()), |e| Err(e.into()))
}

fn check_file(loader: &PlanLoader, path: &Path, strict: bool) -> (FileReport, Option<ConfigError>) {
    let file = path.display().to_string();

    match loader.load(path) {
        Ok(loaded) => {
            let warnings: Vec<ValidationIssue> =
                loaded.warnings.iter().map(warning_issue).collect();
            let failure = (strict && !warnings.is_empty()).then(|| ConfigError::ValidationError {
                path: file.clone(),
                errors: warnings
                    .iter()
                    .cloned()
                    .map(|w| ValidationIssue {
                        severity: Severity::Error,
                        ..w
                    })
                    .collect(),
            });
            let report = FileReport {
                file,
                valid: failure.is_none(),
                plan: Some(loaded.plan.plan.name.clone()),
                exercises: loaded.plan.exercises.len(),
                errors: Vec::new(),
                warnings,
            };
            (report, failure)
        }
        Err(e) => {
            let errors = match &e {
                ConfigError::ValidationError { errors, .. } => errors.clone(),
                other => vec![ValidationIssue {
                    path: String::new(),
                    message: other.to_string(),
                    severity: Severity::Error,
                }],
            };
            let report = FileReport {
                file,
                valid: false,
                plan: None,
                exercises: 0,
                errors,
                warnings: Vec::new(),
            };
            (report, Some(e))
        }
    }
}

fn warning_issue(warning: &LoadWarning) -> ValidationIssue {
    ValidationIssue {
        path: warning.location.clone().unwrap_or_default(),
        message: warning.message.clone(),
        severity: Severity::Warning,
    }
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        let status = if report.valid { "ok" } else { "FAILED" };
        match &report.plan {
            Some(name) => println!(
                "{}: {status} ({name}, {} exercises)",
                report.file, report.exercises
            ),
            None => println!("{}: {status}", report.file),
        }
        for issue in report.errors.iter().chain(&report.warnings) {
            if issue.path.is_empty() {
                println!("  {}", issue.message);
            } else {
                println!("  {issue}");
            }
        }
    }
}
