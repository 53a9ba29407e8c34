//! Error types for sparse representations and the benchmark sweep

use std::time::Duration;

use thiserror::Error;

/// Errors raised by converters, product operations and the benchmark driver
#[derive(Debug, Error)]
pub enum SparseError {
    /// Offset array does not have `outer + 1` entries
    #[error("{axis}_ptr has length {actual}, expected {expected}")]
    InvalidPointerLength {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Offsets decrease somewhere, or do not start at zero
    #[error("{axis}_ptr is not monotonic at position {position}")]
    NonMonotonicPointers { axis: &'static str, position: usize },

    /// Last offset disagrees with the number of stored entries
    #[error("{axis}_ptr ends at {last}, but {nnz} entries are stored")]
    PointerNnzMismatch {
        axis: &'static str,
        last: usize,
        nnz: usize,
    },

    /// Parallel index/value arrays have different lengths
    #[error("index array has length {indices}, value array has length {values}")]
    LengthMismatch { indices: usize, values: usize },

    /// A stored row or column index lies outside the matrix shape
    #[error("{axis} index {index} out of bounds (dimension {bound})")]
    IndexOutOfBounds {
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    /// Two stored entries share the same position
    #[error("duplicate entry at ({row}, {col})")]
    DuplicateEntry { row: usize, col: usize },

    /// A product referenced a vector index the vector does not provide
    #[error("vector has no entry at index {index}")]
    MissingVectorEntry { index: usize },

    /// Dense vector length does not match the matrix column count
    #[error("matrix has {n_cols} columns, vector has length {len}")]
    DimensionMismatch { n_cols: usize, len: usize },

    /// Unrecognized method tag
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// A configuration value could not be parsed
    #[error("invalid value for {key}: '{value}'")]
    InvalidConfig { key: &'static str, value: String },

    /// Generated entries would be zero or not finite
    #[error("entry value must be finite and non-zero, got {0}")]
    InvalidEntryValue(f64),

    /// A trial failed; the sweep stops here
    ///
    /// `elapsed` is the timer reading when the timed product itself failed,
    /// and None when the trial broke before timing started.
    #[error("trial failed for {method} (n={size}, density={density}, repetition {repetition})")]
    Trial {
        method: String,
        size: usize,
        density: f64,
        repetition: usize,
        elapsed: Option<Duration>,
        #[source]
        source: Box<SparseError>,
    },
}

impl SparseError {
    /// True for errors describing a broken representation
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SparseError::InvalidPointerLength { .. }
                | SparseError::NonMonotonicPointers { .. }
                | SparseError::PointerNnzMismatch { .. }
                | SparseError::LengthMismatch { .. }
                | SparseError::IndexOutOfBounds { .. }
                | SparseError::DuplicateEntry { .. }
        )
    }
}

/// Result type for sparse operations
pub type Result<T> = std::result::Result<T, SparseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(SparseError::DuplicateEntry { row: 0, col: 1 }.is_structural());
        assert!(!SparseError::MissingVectorEntry { index: 3 }.is_structural());
    }

    #[test]
    fn test_entry_value_message() {
        let err = SparseError::InvalidEntryValue(f64::NAN);
        assert!(!err.is_structural());
        assert_eq!(err.to_string(), "entry value must be finite and non-zero, got NaN");
    }

    #[test]
    fn test_trial_error_keeps_source() {
        let err = SparseError::Trial {
            method: "coordinate".into(),
            size: 10,
            density: 0.1,
            repetition: 2,
            elapsed: Some(Duration::from_micros(40)),
            source: Box::new(SparseError::MissingVectorEntry { index: 7 }),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("vector has no entry at index 7"));
    }
}
