//! Heuristic table lookup.

use crate::domain::StationId;
use crate::network::CostMatrix;

/// Estimates remaining cost to a fixed goal station by table lookup.
///
/// The estimate is the heuristic matrix entry `[station, goal]`. Nothing is
/// computed; the table must never overestimate the true remaining cost for
/// the search to return optimal routes.
#[derive(Debug, Clone, Copy)]
pub struct Heuristic<'a> {
    table: &'a CostMatrix,
    goal: StationId,
}

impl<'a> Heuristic<'a> {
    pub fn new(table: &'a CostMatrix, goal: StationId) -> Self {
        Self { table, goal }
    }

    /// Estimated cost from `station` to the goal station.
    pub fn estimate(&self, station: StationId) -> f64 {
        self.table.get(station.index(), self.goal.index())
    }
}
