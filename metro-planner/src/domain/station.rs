//! Station identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every station label (`E1`, `E12`, ...).
pub const STATION_PREFIX: char = 'E';

/// Error returned when parsing an invalid station label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station label: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

impl InvalidStation {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A station in the network, identified by its zero-based matrix index.
///
/// Stations are written as `E<n>` where `n` is one-based, so `E1` is the
/// station at index 0 of the cost matrices.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::StationId;
///
/// let e7 = StationId::parse("E7").unwrap();
/// assert_eq!(e7.index(), 6);
/// assert_eq!(e7.to_string(), "E7");
///
/// // Station numbers start at 1
/// assert!(StationId::parse("E0").is_err());
/// assert!(StationId::parse("7").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(usize);

impl StationId {
    /// Create a station from its zero-based matrix index.
    pub const fn from_index(index: usize) -> Self {
        StationId(index)
    }

    /// Parse a station label such as `E12`.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let digits = s
            .strip_prefix(STATION_PREFIX)
            .ok_or(InvalidStation::new("must start with 'E'"))?;
        Self::parse_number(digits)
    }

    /// Parse the one-based station number that follows the prefix.
    pub(crate) fn parse_number(digits: &str) -> Result<Self, InvalidStation> {
        if digits.is_empty() {
            return Err(InvalidStation::new("missing station number"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStation::new("station number must be ASCII digits"));
        }

        let number: usize = digits
            .parse()
            .map_err(|_| InvalidStation::new("station number out of range"))?;
        if number == 0 {
            return Err(InvalidStation::new("station numbers start at 1"));
        }

        Ok(StationId(number - 1))
    }

    /// Returns the zero-based index into the cost matrices.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns the one-based station number used in labels.
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationId::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(station: StationId) -> Self {
        station.to_string()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({self})")
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STATION_PREFIX}{}", self.number())
    }
}
