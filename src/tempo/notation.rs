//! Tempo notation parsing.
//!
//! A tempo is written `E/P1/C/P2`: seconds for the eccentric phase, the
//! pause under load, the concentric phase, and the pause at the top. Any
//! field may be the hold marker `H` instead of a number.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ParseError, ParseErrorReason};

/// Literal that marks a phase as "hold as long as possible".
pub const HOLD_MARKER: &str = "H";

/// Number of slash-separated fields in a tempo notation.
const FIELD_COUNT: usize = 4;

/// Configured length of one tempo phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseDuration {
    /// Fixed number of whole seconds.
    Seconds(u32),
    /// Hold as long as possible.
    Hold,
}

impl PhaseDuration {
    /// Seconds the engine counts down for this phase.
    ///
    /// Hold phases count as zero: they advance on the next tick.
    #[must_use]
    pub const fn countdown_seconds(self) -> u32 {
        match self {
            Self::Seconds(n) => n,
            Self::Hold => 0,
        }
    }

    /// Returns `true` for the hold marker.
    #[must_use]
    pub const fn is_hold(self) -> bool {
        matches!(self, Self::Hold)
    }

    fn parse_token(token: &str) -> Option<Self> {
        if token == HOLD_MARKER {
            return Some(Self::Hold);
        }
        // u32::from_str accepts a leading '+', notation does not
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse().ok().map(Self::Seconds)
    }
}

impl fmt::Display for PhaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(n) => write!(f, "{n}"),
            Self::Hold => f.write_str(HOLD_MARKER),
        }
    }
}

/// Parsed tempo notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempoSpec {
    /// Lowering phase.
    pub eccentric: PhaseDuration,
    /// Pause under load before lifting.
    pub pause1: PhaseDuration,
    /// Lifting phase.
    pub concentric: PhaseDuration,
    /// Pause at the top of the movement.
    pub pause2: PhaseDuration,
}

impl TempoSpec {
    /// Parses a tempo notation such as `"3/1/1/0"` or `"2/H/1/0"`.
    ///
    /// Whitespace around each field is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the notation does not have exactly four
    /// fields, or when a field is neither `H` nor a whole number of seconds.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = input.split('/').map(str::trim).collect();
        if tokens.len() != FIELD_COUNT {
            return Err(ParseError::new(
                input,
                ParseErrorReason::FieldCount(tokens.len()),
            ));
        }

        let mut fields = [PhaseDuration::Hold; FIELD_COUNT];
        for (i, token) in tokens.iter().enumerate() {
            fields[i] = PhaseDuration::parse_token(token).ok_or_else(|| {
                ParseError::new(
                    input,
                    ParseErrorReason::InvalidField {
                        position: i + 1,
                        token: (*token).to_owned(),
                    },
                )
            })?;
        }

        let [eccentric, pause1, concentric, pause2] = fields;
        Ok(Self {
            eccentric,
            pause1,
            concentric,
            pause2,
        })
    }

    /// Fields in notation order.
    #[must_use]
    pub const fn fields(&self) -> [PhaseDuration; FIELD_COUNT] {
        [self.eccentric, self.pause1, self.concentric, self.pause2]
    }

    /// Returns `true` if any phase uses the hold marker.
    #[must_use]
    pub fn has_hold(&self) -> bool {
        self.fields().iter().any(|d| d.is_hold())
    }

    /// Total timed seconds of one repetition; hold phases count as zero.
    #[must_use]
    pub fn seconds_per_rep(&self) -> u64 {
        self.fields()
            .iter()
            .map(|d| u64::from(d.countdown_seconds()))
            .sum()
    }
}

impl FromStr for TempoSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TempoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.eccentric, self.pause1, self.concentric, self.pause2
        )
    }
}

impl Serialize for TempoSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let spec = TempoSpec::parse("3/1/2/0").unwrap();
        assert_eq!(spec.eccentric, PhaseDuration::Seconds(3));
        assert_eq!(spec.pause1, PhaseDuration::Seconds(1));
        assert_eq!(spec.concentric, PhaseDuration::Seconds(2));
        assert_eq!(spec.pause2, PhaseDuration::Seconds(0));
    }

    #[test]
    fn test_parse_hold_marker() {
        let spec = TempoSpec::parse("H/0/H/0").unwrap();
        assert_eq!(spec.eccentric, PhaseDuration::Hold);
        assert_eq!(spec.concentric, PhaseDuration::Hold);
        assert!(spec.has_hold());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec = TempoSpec::parse(" 4 / 0 / 1 / 0 ").unwrap();
        assert_eq!(spec.to_string(), "4/0/1/0");
    }

    #[test]
    fn test_too_few_fields() {
        let err = TempoSpec::parse("3/1/1").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::FieldCount(3));
    }

    #[test]
    fn test_too_many_fields() {
        let err = TempoSpec::parse("3/1/1/0/0").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::FieldCount(5));
    }

    #[test]
    fn test_empty_input_is_one_empty_field() {
        let err = TempoSpec::parse("").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::FieldCount(1));
    }

    #[test]
    fn test_rejects_non_numeric_field() {
        let err = TempoSpec::parse("3/x/1/0").unwrap_err();
        assert_eq!(
            err.reason,
            ParseErrorReason::InvalidField {
                position: 2,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_signs_and_fractions() {
        for bad in ["-1/0/1/0", "+1/0/1/0", "1.5/0/1/0", "3//1/0", "h/0/1/0"] {
            assert!(TempoSpec::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(TempoSpec::parse("99999999999/0/1/0").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for notation in ["3/1/1/0", "H/0/H/0", "10/2/H/1"] {
            let spec: TempoSpec = notation.parse().unwrap();
            assert_eq!(spec.to_string(), notation);
        }
    }

    #[test]
    fn test_countdown_seconds() {
        assert_eq!(PhaseDuration::Seconds(5).countdown_seconds(), 5);
        assert_eq!(PhaseDuration::Hold.countdown_seconds(), 0);
    }

    #[test]
    fn test_seconds_per_rep_ignores_holds() {
        let spec = TempoSpec::parse("3/H/1/2").unwrap();
        assert_eq!(spec.seconds_per_rep(), 6);
    }

    #[test]
    fn test_serializes_as_notation() {
        let spec = TempoSpec::parse("2/H/1/0").unwrap();
        assert_eq!(serde_json::to_string(&spec).unwrap(), "\"2/H/1/0\"");
    }
}
