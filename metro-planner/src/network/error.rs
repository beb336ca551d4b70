//! Network loading and validation errors.

use std::path::PathBuf;

use crate::domain::{InvalidLabel, LineId, StationId};

/// Errors from reading a cost matrix table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The table is not well-formed delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell does not hold a number
    #[error("invalid number {value:?} at row {row}, column {column}")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },

    /// A cell holds a negative cost
    #[error("negative cost {value} at row {row}, column {column}")]
    NegativeCost { row: usize, column: usize, value: f64 },

    /// An edge names a station outside the matrix
    #[error("edge touches station index {station}, but the matrix covers {stations} stations")]
    EdgeOutOfRange { station: usize, stations: usize },

    /// The table has no rows
    #[error("matrix is empty")]
    Empty,

    /// Row and column counts differ
    #[error("matrix must be square, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },
}

/// Errors from assembling a network out of line tables and matrices.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// A matrix failed to load
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The line table file could not be read
    #[error("failed to read line table {path}: {source}")]
    LineTableIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line literal names a malformed line id or station
    #[error("invalid line definition: {0}")]
    InvalidDefinition(#[from] InvalidLabel),

    /// The line table is not valid JSON
    #[error("invalid line table: {0}")]
    LineTableJson(#[from] serde_json::Error),

    /// The same line id is declared twice
    #[error("line {0} is declared more than once")]
    DuplicateLine(LineId),

    /// A line serves no stations
    #[error("line {0} has no stations")]
    EmptyLine(LineId),

    /// A line lists a station the matrices do not cover
    #[error("line {line} serves {station}, but the matrices only cover {stations} stations")]
    StationOutOfRange {
        line: LineId,
        station: StationId,
        stations: usize,
    },

    /// The two matrices have different sizes
    #[error("travel matrix covers {travel} stations but heuristic matrix covers {heuristic}")]
    ShapeMismatch { travel: usize, heuristic: usize },
}
