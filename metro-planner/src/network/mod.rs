//! Transit network data: line tables and cost matrices.
//!
//! A [`Network`] bundles the line membership table with the travel-time
//! matrix (edge weights) and the heuristic-source matrix (straight-line
//! estimates), all in minutes.

mod error;
mod lines;
mod matrix;

use std::path::Path;

use tracing::info;

pub use error::{LoadError, NetworkError};
pub use lines::{LineDefinition, LineTable};
pub use matrix::{CostMatrix, load_matrix, parse_table};

/// A validated network ready for searching.
#[derive(Debug, Clone)]
pub struct Network {
    lines: LineTable,
    travel: CostMatrix,
    heuristic: CostMatrix,
}

impl Network {
    /// Assemble a network, checking that the matrices agree in size and
    /// cover every station the lines serve.
    pub fn new(
        lines: LineTable,
        travel: CostMatrix,
        heuristic: CostMatrix,
    ) -> Result<Self, NetworkError> {
        if travel.len() != heuristic.len() {
            return Err(NetworkError::ShapeMismatch {
                travel: travel.len(),
                heuristic: heuristic.len(),
            });
        }

        for line in lines.lines() {
            if let Some(&station) = line
                .stations
                .iter()
                .find(|station| station.index() >= travel.len())
            {
                return Err(NetworkError::StationOutOfRange {
                    line: line.id.clone(),
                    station,
                    stations: travel.len(),
                });
            }
        }

        Ok(Self {
            lines,
            travel,
            heuristic,
        })
    }

    /// Load both distance tables from disk and convert them to minutes.
    pub fn load(
        lines: LineTable,
        travel_path: impl AsRef<Path>,
        heuristic_path: impl AsRef<Path>,
        speed_kmh: f64,
    ) -> Result<Self, NetworkError> {
        let travel = load_matrix(travel_path)?.to_minutes(speed_kmh);
        let heuristic = load_matrix(heuristic_path)?.to_minutes(speed_kmh);
        let network = Self::new(lines, travel, heuristic)?;

        info!(
            stations = network.station_count(),
            lines = network.lines.len(),
            "Network loaded"
        );

        Ok(network)
    }

    /// The line membership table.
    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    /// Travel times between adjacent stations.
    pub fn travel(&self) -> &CostMatrix {
        &self.travel
    }

    /// Heuristic estimates between any two stations.
    pub fn heuristic(&self) -> &CostMatrix {
        &self.heuristic
    }

    /// Number of stations covered by the matrices.
    pub fn station_count(&self) -> usize {
        self.travel.len()
    }
}
