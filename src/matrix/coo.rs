//! Coordinate (COO) format: an unordered list of (row, col, value) triples

use std::collections::HashSet;
use std::ops::AddAssign;

use ndarray::Array1;
use num_traits::Num;

use crate::error::{Result, SparseError};
use crate::matrix::check_position;
use crate::vector::{check_dim, VectorAccess};

/// A sparse matrix stored as parallel row/column/value arrays
///
/// Entry order carries no meaning. Every position appears at most once;
/// duplicates must be merged before construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrixCOO<T> {
    pub n_rows: usize,
    pub n_cols: usize,
    pub row_idx: Vec<usize>,
    pub col_idx: Vec<usize>,
    pub values: Vec<T>,
}

impl<T> SparseMatrixCOO<T>
where
    T: Copy + Num,
{
    /// Creates a COO matrix, rejecting mismatched arrays, out-of-range
    /// positions and repeated positions
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let matrix = Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Re-checks array lengths, bounds and uniqueness of positions
    pub fn validate(&self) -> Result<()> {
        if self.row_idx.len() != self.values.len() {
            return Err(SparseError::LengthMismatch {
                indices: self.row_idx.len(),
                values: self.values.len(),
            });
        }
        if self.col_idx.len() != self.values.len() {
            return Err(SparseError::LengthMismatch {
                indices: self.col_idx.len(),
                values: self.values.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.values.len());
        for (&row, &col) in self.row_idx.iter().zip(&self.col_idx) {
            check_position(row, col, self.n_rows, self.n_cols)?;
            if !seen.insert((row, col)) {
                return Err(SparseError::DuplicateEntry { row, col });
            }
        }

        Ok(())
    }

    /// Builds a COO matrix from (row, col, value) triples
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut row_idx = Vec::new();
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        for (r, c, v) in triplets {
            row_idx.push(r);
            col_idx.push(c);
            values.push(v);
        }
        Self::new(n_rows, n_cols, row_idx, col_idx, values)
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterates stored entries in storage order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .zip(&self.values)
            .map(|((&r, &c), &v)| (r, c, v))
    }
}

impl<T> SparseMatrixCOO<T>
where
    T: Copy + Num + AddAssign,
{
    /// Matrix-vector product y = A·v, one pass over the triples
    ///
    /// The triples are re-checked first since the fields are public.
    pub fn spmv<V>(&self, v: &V) -> Result<Array1<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        self.validate()?;
        self.spmv_validated(v)
    }

    /// Product for triples that were already checked
    pub(crate) fn spmv_validated<V>(&self, v: &V) -> Result<Array1<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        check_dim(v, self.n_cols)?;

        let mut y = Array1::zeros(self.n_rows);
        for (row, col, val) in self.triplets() {
            y[row] += val * v.lookup(col)?;
        }

        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_triplets() {
        let coo = SparseMatrixCOO::from_triplets(3, 3, vec![(2, 0, 4), (0, 1, 2), (1, 1, 3)])
            .unwrap();
        assert_eq!(coo.nnz(), 3);
        assert_eq!(coo.triplets().next(), Some((2, 0, 4)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = SparseMatrixCOO::from_triplets(2, 2, vec![(0, 1, 1.0), (0, 1, 2.0)]);
        assert!(matches!(
            result,
            Err(SparseError::DuplicateEntry { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = SparseMatrixCOO::from_triplets(2, 2, vec![(2, 0, 1.0)]);
        assert!(matches!(
            result,
            Err(SparseError::IndexOutOfBounds { axis: "row", .. })
        ));
    }

    #[test]
    fn test_mismatched_arrays() {
        let result = SparseMatrixCOO::new(2, 2, vec![0, 1], vec![0], vec![1.0, 2.0]);
        assert!(matches!(result, Err(SparseError::LengthMismatch { .. })));
    }

    #[test]
    fn test_spmv() {
        let coo = SparseMatrixCOO::from_triplets(3, 3, vec![(2, 0, 4), (0, 1, 2), (2, 2, 1)])
            .unwrap();
        let y = coo.spmv(&array![1, 10, 100]).unwrap();
        assert_eq!(y, array![20, 0, 104]);
    }

    #[test]
    fn test_spmv_rejects_edited_triples() {
        let mut coo = SparseMatrixCOO::from_triplets(2, 2, vec![(0, 0, 1.0), (1, 1, 1.0)])
            .unwrap();
        coo.row_idx[1] = 0;
        coo.col_idx[1] = 0;

        assert!(matches!(
            coo.spmv(&vec![1.0, 1.0]),
            Err(SparseError::DuplicateEntry { row: 0, col: 0 })
        ));

        coo.row_idx.pop();
        assert!(matches!(coo.spmv(&vec![1.0, 1.0]), Err(SparseError::LengthMismatch { .. })));
    }
}
