//! Search states.

use std::hash::{Hash, Hasher};

use super::label::Label;
use super::line::LineId;
use super::station::StationId;

/// Error returned when a cost is read before it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("state {label} has no {which} cost")]
pub struct MissingCost {
    label: Label,
    which: &'static str,
}

/// A node of the search graph: a label plus its costs.
///
/// Identity is the label alone. Two states with the same label but different
/// costs compare equal and hash the same, so open/closed membership is keyed
/// by where the rider is, not by how they got there.
#[derive(Debug, Clone)]
pub struct State {
    label: Label,
    g: Option<f64>,
    h: Option<f64>,
}

impl State {
    /// Create a state with no costs assigned.
    pub fn new(label: Label) -> Self {
        Self {
            label,
            g: None,
            h: None,
        }
    }

    /// Create a state with cost-so-far `g` and heuristic estimate `h`.
    pub fn with_costs(label: Label, g: f64, h: f64) -> Self {
        Self {
            label,
            g: Some(g),
            h: Some(h),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn line(&self) -> &LineId {
        self.label.line()
    }

    pub fn station(&self) -> StationId {
        self.label.station()
    }

    pub fn station_index(&self) -> usize {
        self.label.station_index()
    }

    /// Cost from the start, if assigned.
    pub fn g(&self) -> Option<f64> {
        self.g
    }

    /// Heuristic estimate to the goal, if assigned.
    pub fn h(&self) -> Option<f64> {
        self.h
    }

    /// Cost from the start, failing if unassigned.
    pub fn cost(&self) -> Result<f64, MissingCost> {
        self.g.ok_or_else(|| MissingCost {
            label: self.label.clone(),
            which: "g",
        })
    }

    /// Total estimated cost `g + h`.
    pub fn f(&self) -> Result<f64, MissingCost> {
        let h = self.h.ok_or_else(|| MissingCost {
            label: self.label.clone(),
            which: "h",
        })?;
        Ok(self.cost()? + h)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}
