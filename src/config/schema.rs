//! Workout plan schema
//!
//! A plan file names a session and lists its exercises, each with the
//! tempo to coach it at:
//!
//! ```yaml
//! plan:
//!   name: Lower body A
//!   client: Jordan
//!   tick_interval: 1s
//! exercises:
//!   - name: Back squat
//!     tempo: "3/1/1/0"
//!     sets: 4
//!     reps: 6
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::driver::DEFAULT_TICK_INTERVAL;
use crate::error::ConfigError;

/// Root of a workout plan file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutPlan {
    /// Plan metadata.
    pub plan: PlanMetadata,

    /// Exercises in session order.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Plan-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanMetadata {
    /// Display name of the plan.
    pub name: String,

    /// Client the plan was written for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Tick period as a humantime string (`"1s"`, `"500ms"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval: Option<String>,
}

/// One exercise in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exercise {
    /// Exercise name, unique within the plan.
    pub name: String,

    /// Tempo notation, e.g. `"3/1/1/0"`.
    pub tempo: String,

    /// Prescribed number of sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,

    /// Prescribed repetitions per set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,

    /// Free-form coaching notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutPlan {
    /// Finds an exercise by name, ignoring ASCII case.
    #[must_use]
    pub fn find_exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Suggests the closest exercise name for a typo.
    ///
    /// Returns a match if its Damerau-Levenshtein distance is ≤ 3.
    #[must_use]
    pub fn suggest_exercise(&self, input: &str) -> Option<&str> {
        let input = input.to_lowercase();
        self.exercises
            .iter()
            .map(|e| {
                (
                    e.name.as_str(),
                    strsim::damerau_levenshtein(&input, &e.name.to_lowercase()),
                )
            })
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name)
    }

    /// Tick period for sessions from this plan.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `tick_interval` is not a
    /// valid non-zero duration.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        self.plan
            .tick_interval
            .as_deref()
            .map_or(Ok(DEFAULT_TICK_INTERVAL), parse_tick_interval)
    }
}

/// Parses a humantime tick period, rejecting zero.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for unparseable or zero durations.
pub fn parse_tick_interval(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: "tick_interval".to_string(),
        value: raw.to_string(),
        expected: "a non-zero duration such as '1s' or '500ms'".to_string(),
    };
    let duration = humantime::parse_duration(raw.trim()).map_err(|_| invalid())?;
    if duration.is_zero() {
        return Err(invalid());
    }
    Ok(duration)
}
