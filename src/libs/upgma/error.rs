use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// No sequences to cluster
    EmptyInput,
    /// The distance matrix does not hold `expected` cells
    DimensionMismatch {
        /// n * n for the declared sequence count
        expected: usize,
        /// Cells actually supplied
        found: usize,
    },
    /// A sequence name is absent from, or duplicated in, a loaded matrix
    UnknownName(String),
    /// A sequence's `index` is not its position in the input
    IndexOutOfPlace {
        id: String,
        index: usize,
        position: usize,
    },
    /// A matrix cell is negative, NaN or infinite
    InvalidDistance { row: usize, col: usize, value: f32 },
    /// A squared embedding distance came out below zero
    NegativeDistance { i: usize, j: usize, value: f32 },
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterError::EmptyInput => write!(f, "No sequences to cluster"),
            ClusterError::DimensionMismatch { expected, found } => write!(
                f,
                "Distance matrix has {} cells, expected {}",
                found, expected
            ),
            ClusterError::UnknownName(name) => {
                write!(f, "Sequence [{}] does not match the distance matrix", name)
            }
            ClusterError::IndexOutOfPlace {
                id,
                index,
                position,
            } => write!(
                f,
                "Sequence [{}] at position {} carries matrix index {}",
                id, position, index
            ),
            ClusterError::InvalidDistance { row, col, value } => write!(
                f,
                "Invalid distance {} at row {}, column {}",
                value, row, col
            ),
            ClusterError::NegativeDistance { i, j, value } => write!(
                f,
                "Negative squared distance {} between sequences {} and {}",
                value, i, j
            ),
        }
    }
}

impl std::error::Error for ClusterError {}
