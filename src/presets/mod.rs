//! Built-in tempo presets
//!
//! Named tempos commonly prescribed by coaches, so a session can start
//! without typing notation: `tempocue run --preset slow-eccentric`

use crate::error::ParseError;
use crate::tempo::TempoSpec;

// ============================================================================
// Types
// ============================================================================

/// A named tempo embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct TempoPreset {
    /// Unique identifier (kebab-case, e.g., "slow-eccentric").
    pub name: &'static str,

    /// Short human-readable description.
    pub description: &'static str,

    /// Tempo notation.
    pub notation: &'static str,
}

impl TempoPreset {
    /// Parses the preset's notation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the embedded notation is invalid.
    pub fn spec(&self) -> Result<TempoSpec, ParseError> {
        TempoSpec::parse(self.notation)
    }
}

// ============================================================================
// Registry
// ============================================================================

static BUILTIN_PRESETS: [TempoPreset; 6] = [
    TempoPreset {
        name: "controlled",
        description: "General strength work, steady lowering",
        notation: "3/1/1/0",
    },
    TempoPreset {
        name: "slow-eccentric",
        description: "Emphasised lowering for hypertrophy",
        notation: "4/0/1/0",
    },
    TempoPreset {
        name: "paused-squat",
        description: "Dead stop in the hole, no bounce",
        notation: "2/2/1/0",
    },
    TempoPreset {
        name: "isometric-bottom",
        description: "Hold the bottom position as long as possible",
        notation: "2/H/1/0",
    },
    TempoPreset {
        name: "explosive",
        description: "Controlled lowering, fast lift",
        notation: "2/0/0/0",
    },
    TempoPreset {
        name: "time-under-tension",
        description: "Slow in both directions with a squeeze at the top",
        notation: "3/1/3/1",
    },
];

// ============================================================================
// Public API
// ============================================================================

/// Look up a preset by exact name.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static TempoPreset> {
    BUILTIN_PRESETS.iter().find(|p| p.name == name)
}

/// All presets in registry order.
#[must_use]
pub fn list_presets() -> &'static [TempoPreset] {
    &BUILTIN_PRESETS
}

/// Suggest a similar preset name for typo correction.
///
/// Returns the closest match if its Damerau-Levenshtein distance is ≤ 3.
#[must_use]
pub fn suggest_preset(input: &str) -> Option<String> {
    BUILTIN_PRESETS
        .iter()
        .map(|p| (p.name, strsim::damerau_levenshtein(input, p.name)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_builtin_presets_parse() {
        for preset in list_presets() {
            assert!(
                preset.spec().is_ok(),
                "preset '{}' has invalid notation '{}'",
                preset.name,
                preset.notation
            );
        }
    }

    #[test]
    fn preset_names_are_unique() {
        let names: HashSet<_> = list_presets().iter().map(|p| p.name).collect();
        assert_eq!(names.len(), list_presets().len());
    }

    #[test]
    fn find_known_preset() {
        let preset = find_preset("slow-eccentric").unwrap();
        assert_eq!(preset.notation, "4/0/1/0");
    }

    #[test]
    fn find_unknown_preset() {
        assert!(find_preset("nope").is_none());
    }

    #[test]
    fn suggest_close_typo() {
        assert_eq!(
            suggest_preset("controled").as_deref(),
            Some("controlled")
        );
        assert_eq!(suggest_preset("explosiv").as_deref(), Some("explosive"));
    }

    #[test]
    fn no_suggestion_for_distant_input() {
        assert!(suggest_preset("completely-unrelated").is_none());
    }
}
