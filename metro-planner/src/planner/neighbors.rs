//! Successor generation.
//!
//! From a state at station S on line L, every station T adjacent to S in the
//! travel matrix produces one of two successors:
//!
//! - T is on L: ride to T, staying on L, for the matrix edge cost.
//! - T is not on L: change line at S onto the first declared line serving
//!   both S and T, for the flat transfer cost. The rider stays at S; the
//!   ride to T happens on a later expansion.

use tracing::trace;

use crate::domain::{Label, MissingCost, State, StationId};
use crate::network::{CostMatrix, LineTable};

use super::heuristic::Heuristic;

/// Produces successor states with their g and h costs.
#[derive(Debug, Clone, Copy)]
pub struct NeighborGenerator<'a> {
    travel: &'a CostMatrix,
    lines: &'a LineTable,
    heuristic: Heuristic<'a>,
    transfer_cost: f64,
}

impl<'a> NeighborGenerator<'a> {
    pub fn new(
        travel: &'a CostMatrix,
        lines: &'a LineTable,
        heuristic: Heuristic<'a>,
        transfer_cost: f64,
    ) -> Self {
        Self {
            travel,
            lines,
            heuristic,
            transfer_cost,
        }
    }

    /// Successors of `current`, in travel-matrix column order.
    ///
    /// Fails only if `current` has no g cost. No open/closed filtering is
    /// applied here.
    pub fn neighbors(&self, current: &State) -> Result<Vec<State>, MissingCost> {
        let g = current.cost()?;
        let here = current.station();
        let line = current.line();
        let mut neighbors: Vec<State> = Vec::new();

        for (index, edge_cost) in self.travel.edges_from(here.index()) {
            let next = StationId::from_index(index);

            if self.lines.serves(line, next) {
                let label = Label::new(next, line.clone());
                neighbors.push(self.state(label, g + edge_cost));
                continue;
            }

            let Some(new_line) = self.lines.line_between(next, here) else {
                trace!(from = %here, to = %next, "No line serves both stations");
                continue;
            };

            let label = current.label().on_line(new_line.clone());
            if neighbors.iter().any(|n| n.label() == &label) {
                continue;
            }
            neighbors.push(self.state(label, g + self.transfer_cost));
        }

        Ok(neighbors)
    }

    fn state(&self, label: Label, g: f64) -> State {
        let h = self.heuristic.estimate(label.station());
        State::with_costs(label, g, h)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::LineTable;
    use ndarray::Array2;
    use proptest::prelude::*;

    /// Random edge weights over the 14-station reference network.
    fn reference_edges() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
        proptest::collection::vec((0usize..14, 0usize..14, 0.5f64..20.0), 1..40)
            .prop_map(|edges| edges.into_iter().filter(|(a, b, _)| a != b).collect())
    }

    proptest! {
        /// Successors never cost less than their parent, and every line
        /// change costs exactly the transfer penalty
        #[test]
        fn costs_are_monotone(
            edges in reference_edges(),
            station in 0usize..14,
            g in 0.0f64..100.0,
            transfer in 0.0f64..10.0,
        ) {
            let travel = CostMatrix::from_edges(14, &edges).unwrap();
            let h = CostMatrix::new(Array2::zeros((14, 14))).unwrap();
            let lines = LineTable::reference().unwrap();
            let generator = NeighborGenerator::new(
                &travel,
                &lines,
                Heuristic::new(&h, StationId::from_index(0)),
                transfer,
            );

            let here = StationId::from_index(station);
            for line in lines.lines_at(here) {
                let current = State::with_costs(Label::new(here, line.clone()), g, 0.0);
                for neighbor in generator.neighbors(&current).unwrap() {
                    let ng = neighbor.g().unwrap();
                    prop_assert!(ng >= g);
                    if neighbor.line() != current.line() {
                        prop_assert_eq!(ng, g + transfer);
                        prop_assert_eq!(neighbor.station(), here);
                    }
                }
            }
        }
    }
}
