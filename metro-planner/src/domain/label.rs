//! Station + line labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::line::{InvalidLineId, LineId};
use super::station::{InvalidStation, STATION_PREFIX, StationId};

/// Error returned when parsing an invalid label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLabel {
    /// The station part is malformed
    #[error(transparent)]
    Station(#[from] InvalidStation),

    /// The line part is malformed
    #[error(transparent)]
    Line(#[from] InvalidLineId),

    /// No line suffix follows the station number
    #[error("label {0:?} has no line suffix")]
    MissingLine(String),
}

/// A search position: a physical station together with the line being ridden.
///
/// Written as `E<n><line>`, e.g. `E1r` is station 1 on line `r`. The same
/// station on two different lines is two different labels.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::Label;
///
/// let label: Label = "E12b".parse().unwrap();
/// assert_eq!(label.station().index(), 11);
/// assert_eq!(label.line().as_str(), "b");
/// assert_eq!(label.to_string(), "E12b");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    station: StationId,
    line: LineId,
}

impl Label {
    /// Create a label from its parts.
    pub fn new(station: StationId, line: LineId) -> Self {
        Self { station, line }
    }

    /// Parse a label such as `E3g`.
    pub fn parse(s: &str) -> Result<Self, InvalidLabel> {
        let rest = s
            .strip_prefix(STATION_PREFIX)
            .ok_or(InvalidStation::new("must start with 'E'"))?;

        let split = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| InvalidLabel::MissingLine(s.to_string()))?;
        let (digits, line) = rest.split_at(split);

        let station = StationId::parse_number(digits)?;
        let line = LineId::parse(line)?;

        Ok(Self { station, line })
    }

    /// Returns the station part.
    pub fn station(&self) -> StationId {
        self.station
    }

    /// Returns the zero-based matrix index of the station.
    pub fn station_index(&self) -> usize {
        self.station.index()
    }

    /// Returns the line part.
    pub fn line(&self) -> &LineId {
        &self.line
    }

    /// Returns the same station on another line.
    pub fn on_line(&self, line: LineId) -> Self {
        Self {
            station: self.station,
            line,
        }
    }
}

impl FromStr for Label {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::parse(s)
    }
}

impl TryFrom<String> for Label {
    type Error = InvalidLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Label::parse(&value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({self})")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.station, self.line)
    }
}
