//! Line membership tables.
//!
//! A line table maps each line id to the ordered list of stations it serves.
//! Declaration order matters: when more than one line serves both ends of a
//! transfer, the line declared first is the one the rider changes onto.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidLabel, LineId, StationId};

use super::error::NetworkError;

/// One line and the stations it serves, in service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDefinition {
    pub id: LineId,
    pub stations: Vec<StationId>,
}

impl LineDefinition {
    /// Build a definition from a line id and station labels.
    ///
    /// Fails on the first malformed id or station label.
    pub fn from_labels(id: &str, stations: &[&str]) -> Result<Self, InvalidLabel> {
        let id = LineId::parse(id)?;
        let stations = stations
            .iter()
            .map(|s| StationId::parse(s))
            .collect::<Result<_, _>>()?;
        Ok(Self { id, stations })
    }
}

/// Validated, ordered collection of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineDefinition>", into = "Vec<LineDefinition>")]
pub struct LineTable {
    lines: Vec<LineDefinition>,
    /// Station sets parallel to `lines`, for membership tests.
    members: Vec<HashSet<StationId>>,
}

impl LineTable {
    /// Create a table, rejecting duplicate ids and lines with no stations.
    pub fn new(lines: Vec<LineDefinition>) -> Result<Self, NetworkError> {
        let mut seen = HashSet::new();
        for line in &lines {
            if !seen.insert(&line.id) {
                return Err(NetworkError::DuplicateLine(line.id.clone()));
            }
            if line.stations.is_empty() {
                return Err(NetworkError::EmptyLine(line.id.clone()));
            }
        }

        let members = membership(&lines);
        Ok(Self { lines, members })
    }

    /// Parse a table from its JSON form: a list of `{ "id", "stations" }`.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let lines: Vec<LineDefinition> = serde_json::from_str(json)?;
        Self::new(lines)
    }

    /// Read a JSON line table from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::LineTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a table from `(line id, station labels)` literals.
    pub fn from_literals(lines: &[(&str, &[&str])]) -> Result<Self, NetworkError> {
        let lines = lines
            .iter()
            .map(|(id, stations)| LineDefinition::from_labels(id, stations))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lines)
    }

    /// The four-line, fourteen-station reference network.
    pub fn reference() -> Result<Self, NetworkError> {
        Self::from_literals(&[
            ("b", &["E6", "E7", "E3", "E8", "E10", "E12"]),
            ("g", &["E7", "E2", "E9", "E10", "E13"]),
            ("r", &["E1", "E2", "E3", "E4", "E14"]),
            ("y", &["E11", "E9", "E8", "E4", "E5"]),
        ])
    }

    /// Lines in declaration order.
    pub fn lines(&self) -> &[LineDefinition] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn get(&self, id: &LineId) -> Option<&LineDefinition> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Check whether `line` serves `station`.
    ///
    /// Unknown lines serve nothing.
    pub fn serves(&self, line: &LineId, station: StationId) -> bool {
        self.lines
            .iter()
            .zip(&self.members)
            .find(|(def, _)| &def.id == line)
            .is_some_and(|(_, members)| members.contains(&station))
    }

    /// First declared line serving both stations, if any.
    pub fn line_between(&self, a: StationId, b: StationId) -> Option<&LineId> {
        self.lines_at(a).find(|line| self.serves(line, b))
    }

    /// All lines serving a station, in declaration order.
    pub fn lines_at(&self, station: StationId) -> impl Iterator<Item = &LineId> + '_ {
        self.lines
            .iter()
            .zip(&self.members)
            .filter(move |(_, members)| members.contains(&station))
            .map(|(def, _)| &def.id)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no lines are declared.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn membership(lines: &[LineDefinition]) -> Vec<HashSet<StationId>> {
    lines
        .iter()
        .map(|line| line.stations.iter().copied().collect())
        .collect()
}

impl TryFrom<Vec<LineDefinition>> for LineTable {
    type Error = NetworkError;

    fn try_from(lines: Vec<LineDefinition>) -> Result<Self, Self::Error> {
        LineTable::new(lines)
    }
}

impl From<LineTable> for Vec<LineDefinition> {
    fn from(table: LineTable) -> Self {
        table.lines
    }
}
