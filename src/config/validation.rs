//! Workout plan validation
//!
//! Semantic checks run on a deserialized `WorkoutPlan`. Validation
//! collects every issue rather than stopping at the first one.

use std::collections::HashSet;

use crate::config::loader::PlanLimits;
use crate::config::schema::{Exercise, WorkoutPlan, parse_tick_interval};
use crate::error::{Severity, ValidationIssue};
use crate::tempo::{PhaseDuration, TempoSpec};

/// Phases longer than this draw a warning.
const LONG_PHASE_SECONDS: u32 = 60;

// ============================================================================
// Public API
// ============================================================================

/// Result of plan validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Plan validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a plan and returns every error and warning found.
    pub fn validate(&mut self, plan: &WorkoutPlan, limits: &PlanLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_metadata(plan);
        self.validate_exercises(plan, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_metadata(&mut self, plan: &WorkoutPlan) {
        if plan.plan.name.trim().is_empty() {
            self.add_error("plan.name", "Plan name is required and cannot be empty");
        }

        if let Some(raw) = &plan.plan.tick_interval {
            if let Err(e) = parse_tick_interval(raw) {
                self.add_error("plan.tick_interval", &e.to_string());
            }
        }
    }

    fn validate_exercises(&mut self, plan: &WorkoutPlan, limits: &PlanLimits) {
        if plan.exercises.is_empty() {
            self.add_error("exercises", "Plan must list at least one exercise");
            return;
        }

        if plan.exercises.len() > limits.max_exercises {
            self.add_error(
                "exercises",
                &format!(
                    "Plan lists {} exercises, limit is {}",
                    plan.exercises.len(),
                    limits.max_exercises
                ),
            );
        }

        let mut seen = HashSet::new();
        for (i, exercise) in plan.exercises.iter().enumerate() {
            let path = format!("exercises[{i}]");

            if exercise.name.trim().is_empty() {
                self.add_error(&format!("{path}.name"), "Exercise name cannot be empty");
            } else if !seen.insert(exercise.name.to_lowercase()) {
                self.add_error(
                    &format!("{path}.name"),
                    &format!("Duplicate exercise name '{}'", exercise.name),
                );
            }

            self.validate_prescription(&path, exercise);
            self.validate_tempo(&path, exercise);
        }
    }

    fn validate_prescription(&mut self, path: &str, exercise: &Exercise) {
        if exercise.sets == Some(0) {
            self.add_error(&format!("{path}.sets"), "Sets must be at least 1");
        }
        if exercise.reps == Some(0) {
            self.add_error(&format!("{path}.reps"), "Reps must be at least 1");
        }
    }

    fn validate_tempo(&mut self, path: &str, exercise: &Exercise) {
        let tempo_path = format!("{path}.tempo");
        let spec = match TempoSpec::parse(&exercise.tempo) {
            Ok(spec) => spec,
            Err(e) => {
                self.add_error(&tempo_path, &e.to_string());
                return;
            }
        };

        if spec.has_hold() {
            self.add_warning(
                &tempo_path,
                "Hold phases advance on the next tick; the athlete is cued to hold but the timer does not wait",
            );
        }

        let longest = spec
            .fields()
            .iter()
            .filter_map(|d| match d {
                PhaseDuration::Seconds(n) => Some(*n),
                PhaseDuration::Hold => None,
            })
            .max()
            .unwrap_or(0);
        if longest > LONG_PHASE_SECONDS {
            self.add_warning(
                &tempo_path,
                &format!("Phase of {longest}s is unusually long (> {LONG_PHASE_SECONDS}s)"),
            );
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
