//! Line identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest accepted line identifier.
const MAX_LEN: usize = 8;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// Identifier of a transit line, e.g. `r` for the red line.
///
/// Line ids are 1 to 8 lowercase ASCII letters. They are written directly
/// after the station number in a label, so `E3b` is station 3 on line `b`.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::LineId;
///
/// let red = LineId::parse("r").unwrap();
/// assert_eq!(red.as_str(), "r");
///
/// // Uppercase and digits are rejected
/// assert!(LineId::parse("R").is_err());
/// assert!(LineId::parse("r2").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }
        if s.len() > MAX_LEN {
            return Err(InvalidLineId {
                reason: "must be at most 8 characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(InvalidLineId {
                reason: "must be lowercase ASCII letters a-z",
            });
        }

        Ok(LineId(s.to_string()))
    }

    /// Returns the line id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineId {
    type Error = InvalidLineId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LineId::parse(&value)
    }
}

impl From<LineId> for String {
    fn from(line: LineId) -> Self {
        line.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
