//! Cost matrices and the delimited-table loader.
//!
//! Tables are header-less, comma separated and hold one triangle of a
//! symmetric station × station matrix, in kilometres. Loading mirrors the
//! table across the diagonal, turns missing off-diagonal entries into
//! "no edge", and callers convert the result to minutes before searching.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use super::error::LoadError;

/// Minutes per hour, for distance → time conversion.
const MINUTES_PER_HOUR: f64 = 60.0;

/// A square station × station cost matrix.
///
/// Off-diagonal entries of `f64::INFINITY` mean the stations have no direct
/// connection.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    costs: Array2<f64>,
}

impl CostMatrix {
    /// Wrap a matrix whose entries are already final costs.
    ///
    /// Zeros are kept as zeros, so this is the constructor for heuristic
    /// tables that may legitimately be zero everywhere.
    pub fn new(costs: Array2<f64>) -> Result<Self, LoadError> {
        let (rows, columns) = costs.dim();
        if rows == 0 {
            return Err(LoadError::Empty);
        }
        if rows != columns {
            return Err(LoadError::NotSquare { rows, columns });
        }
        if let Some(((row, column), &value)) =
            costs.indexed_iter().find(|(_, v)| v.is_nan() || **v < 0.0)
        {
            if value.is_nan() {
                return Err(LoadError::InvalidNumber {
                    row,
                    column,
                    value: value.to_string(),
                });
            }
            return Err(LoadError::NegativeCost { row, column, value });
        }

        Ok(Self { costs })
    }

    /// Build an edge-cost matrix from a raw distance table.
    ///
    /// The table is added to its own transpose, then every off-diagonal
    /// zero becomes `f64::INFINITY` and the diagonal is forced to zero.
    pub fn from_table(raw: Array2<f64>) -> Result<Self, LoadError> {
        let (rows, columns) = raw.dim();
        if rows != columns {
            return Err(LoadError::NotSquare { rows, columns });
        }

        let mut costs = &raw + &raw.t();
        for ((row, column), value) in costs.indexed_iter_mut() {
            if row == column {
                *value = 0.0;
            } else if *value == 0.0 {
                *value = f64::INFINITY;
            }
        }

        Self::new(costs)
    }

    /// Build an edge-cost matrix from an edge list over `stations` stations.
    ///
    /// Each edge is stored in both directions; unlisted pairs have no edge.
    pub fn from_edges(stations: usize, edges: &[(usize, usize, f64)]) -> Result<Self, LoadError> {
        let mut raw = Array2::<f64>::zeros((stations, stations));
        for &(a, b, cost) in edges {
            if a >= stations || b >= stations {
                return Err(LoadError::EdgeOutOfRange {
                    station: a.max(b),
                    stations,
                });
            }
            raw[[a.min(b), a.max(b)]] = cost;
        }
        Self::from_table(raw)
    }

    /// Convert kilometres to minutes at a constant speed.
    pub fn to_minutes(&self, speed_kmh: f64) -> Self {
        Self {
            costs: self.costs.mapv(|km| MINUTES_PER_HOUR * km / speed_kmh),
        }
    }

    /// Returns the number of stations covered.
    pub fn len(&self) -> usize {
        self.costs.nrows()
    }

    /// Returns true if the matrix covers no stations.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Raw entry at `[from, to]`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.costs[[from, to]]
    }

    /// Cost of the direct edge `from → to`, if one exists.
    pub fn edge(&self, from: usize, to: usize) -> Option<f64> {
        self.costs
            .get([from, to])
            .copied()
            .filter(|cost| cost.is_finite() && *cost > 0.0)
    }

    /// Stations directly connected to `from`, with edge costs, in index order.
    pub fn edges_from(&self, from: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..self.len()).filter_map(move |to| self.edge(from, to).map(|cost| (to, cost)))
    }
}

/// Read a raw distance table from any reader.
///
/// Cells may be quoted and use a decimal comma (`"1,5"`); empty cells
/// and `NaN` read as zero.
pub fn parse_table<R: Read>(reader: R) -> Result<Array2<f64>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut rows = 0;
    let mut columns = 0;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        columns = record.len();
        for (column, field) in record.iter().enumerate() {
            values.push(parse_cell(field).ok_or_else(|| LoadError::InvalidNumber {
                row,
                column,
                value: field.to_string(),
            })?);
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(LoadError::Empty);
    }
    if rows != columns {
        return Err(LoadError::NotSquare { rows, columns });
    }

    Array2::from_shape_vec((rows, columns), values)
        .map_err(|_| LoadError::NotSquare { rows, columns })
}

fn parse_cell(field: &str) -> Option<f64> {
    if field.is_empty() {
        return Some(0.0);
    }
    let value: f64 = field.replace(',', ".").parse().ok()?;
    Some(if value.is_nan() { 0.0 } else { value })
}

/// Load a distance table from disk as an edge-cost matrix (still in km).
pub fn load_matrix(path: impl AsRef<Path>) -> Result<CostMatrix, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw = parse_table(file)?;
    let matrix = CostMatrix::from_table(raw)?;

    debug!(
        path = %path.display(),
        stations = matrix.len(),
        "Loaded cost matrix"
    );

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_table_mirrors_and_marks_missing_edges() {
        let raw = array![[0.0, 2.0, 0.0], [0.0, 0.0, 4.0], [0.0, 0.0, 0.0]];
        let matrix = CostMatrix::from_table(raw).unwrap();

        assert_eq!(matrix.get(0, 1), 2.0);
        assert_eq!(matrix.get(1, 0), 2.0);
        assert_eq!(matrix.get(2, 1), 4.0);
        assert_eq!(matrix.get(0, 2), f64::INFINITY);
        assert_eq!(matrix.get(1, 1), 0.0);
    }

    #[test]
    fn edge_lookup() {
        let matrix = CostMatrix::from_edges(3, &[(0, 1, 2.0)]).unwrap();
        assert_eq!(matrix.edge(0, 1), Some(2.0));
        assert_eq!(matrix.edge(1, 0), Some(2.0));
        assert_eq!(matrix.edge(0, 2), None);
        assert_eq!(matrix.edge(0, 0), None);
        assert_eq!(matrix.edge(0, 9), None);
    }

    #[test]
    fn edges_from_in_index_order() {
        let matrix = CostMatrix::from_edges(4, &[(1, 3, 1.0), (1, 0, 5.0)]).unwrap();
        let edges: Vec<_> = matrix.edges_from(1).collect();
        assert_eq!(edges, vec![(0, 5.0), (3, 1.0)]);
    }

    #[test]
    fn from_edges_rejects_out_of_range() {
        assert!(matches!(
            CostMatrix::from_edges(2, &[(0, 2, 1.0)]),
            Err(LoadError::EdgeOutOfRange { station: 2, stations: 2 })
        ));
    }

    #[test]
    fn new_keeps_zeros() {
        let matrix = CostMatrix::new(Array2::zeros((3, 3))).unwrap();
        assert_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.edge(0, 2), None);
    }

    #[test]
    fn new_rejects_bad_matrices() {
        assert!(matches!(
            CostMatrix::new(Array2::zeros((2, 3))),
            Err(LoadError::NotSquare { rows: 2, columns: 3 })
        ));
        assert!(matches!(
            CostMatrix::new(Array2::zeros((0, 0))),
            Err(LoadError::Empty)
        ));
        assert!(matches!(
            CostMatrix::new(array![[0.0, -1.0], [-1.0, 0.0]]),
            Err(LoadError::NegativeCost { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn to_minutes_at_40_kmh() {
        let matrix = CostMatrix::from_edges(2, &[(0, 1, 10.0)]).unwrap();
        let minutes = matrix.to_minutes(40.0);
        assert_eq!(minutes.get(0, 1), 15.0);
        assert_eq!(minutes.get(0, 0), 0.0);
        assert_eq!(minutes.len(), 2);
    }

    #[test]
    fn to_minutes_keeps_missing_edges() {
        let matrix = CostMatrix::from_edges(3, &[(0, 1, 10.0)]).unwrap();
        assert_eq!(matrix.to_minutes(40.0).get(0, 2), f64::INFINITY);
    }

    #[test]
    fn parse_table_handles_empty_cells_and_decimal_commas() {
        let text = "0,\"1,5\",\n,0,2.25\n,,0\n";
        let raw = parse_table(text.as_bytes()).unwrap();
        assert_eq!(raw.dim(), (3, 3));
        assert_eq!(raw[[0, 1]], 1.5);
        assert_eq!(raw[[0, 2]], 0.0);
        assert_eq!(raw[[1, 2]], 2.25);
    }

    #[test]
    fn parse_table_rejects_garbage() {
        let result = parse_table("0,x\n0,0\n".as_bytes());
        assert!(matches!(
            result,
            Err(LoadError::InvalidNumber { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn parse_table_rejects_non_square() {
        let result = parse_table("0,1,2\n0,0,3\n".as_bytes());
        assert!(matches!(
            result,
            Err(LoadError::NotSquare { rows: 2, columns: 3 })
        ));
    }

    #[test]
    fn parse_table_rejects_ragged_rows() {
        let result = parse_table("0,1\n0\n".as_bytes());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn parse_table_rejects_empty_input() {
        assert!(matches!(parse_table("".as_bytes()), Err(LoadError::Empty)));
    }

    #[test]
    fn load_matrix_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dists.csv");
        std::fs::write(&path, "0,4,\n,0,8\n,,0\n").unwrap();

        let matrix = load_matrix(&path).unwrap();
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.edge(2, 1), Some(8.0));
        assert_eq!(matrix.edge(0, 2), None);
    }

    #[test]
    fn load_matrix_missing_file() {
        let result = load_matrix("/nonexistent/dists.csv");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
