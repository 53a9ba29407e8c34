//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use ndarray::Array1;
use num_traits::Num;

use crate::error::Result;
use crate::matrix::{validate_compressed, Compressed};
use crate::vector::{check_dim, VectorAccess};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// This is the layout the generator produces and every other format is derived from.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Errors
    ///
    /// Returns a structural error if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - row_ptr must start at 0 and never decrease
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    /// - every column index must be below n_cols
    /// - no column may appear twice within a row
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        validate_compressed(Compressed::Row, n_rows, n_cols, &row_ptr, &col_idx, values.len())?;

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Re-checks the structural invariants of this matrix
    ///
    /// Fields are public, so a matrix can be edited into an invalid state
    /// after construction.
    pub fn validate(&self) -> Result<()> {
        validate_compressed(
            Compressed::Row,
            self.n_rows,
            self.n_cols,
            &self.row_ptr,
            &self.col_idx,
            self.values.len(),
        )
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Realized density: nnz / (n_rows * n_cols)
    pub fn density(&self) -> f64 {
        let cells = self.n_rows * self.n_cols;
        if cells == 0 {
            0.0
        } else {
            self.nnz() as f64 / cells as f64
        }
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Iterates every stored entry as (row, col, value) in row-major order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.n_rows).flat_map(move |i| self.row_iter(i).map(move |(j, &v)| (i, j, v)))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Matrix-vector product y = A·v
    ///
    /// The result is dense with one slot per row; empty rows yield zero.
    /// Each stored entry is visited exactly once. The structure is re-checked
    /// first since the fields may have been edited after construction.
    pub fn spmv<V>(&self, v: &V) -> Result<Array1<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        self.validate()?;
        self.spmv_validated(v)
    }

    /// Product for a matrix whose structure was already checked
    pub(crate) fn spmv_validated<V>(&self, v: &V) -> Result<Array1<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        check_dim(v, self.n_cols)?;

        let mut y = Array1::zeros(self.n_rows);
        for (i, out) in y.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (col, &val) in self.row_iter(i) {
                acc += val * v.lookup(col)?;
            }
            *out = acc;
        }

        Ok(y)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SparseError;
    use crate::vector::SparseVector;
    use ndarray::array;

    fn sample() -> SparseMatrixCSR<i32> {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap()
    }

    #[test]
    fn test_new_matrix() {
        let matrix = sample();

        assert_eq!(matrix.n_rows, 3);
        assert_eq!(matrix.n_cols, 3);
        assert_eq!(matrix.nnz(), 5);
        assert!((matrix.density() - 5.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_iter() {
        let matrix = sample();

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row1: Vec<_> = matrix.row_iter(1).collect();
        assert_eq!(row1, vec![(1, &3)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_invalid_row_ptr() {
        let result = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        assert!(matches!(
            result,
            Err(SparseError::InvalidPointerLength { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_inconsistent_lengths() {
        let result = SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4], // Missing last element
        );
        assert!(matches!(result, Err(SparseError::LengthMismatch { .. })));
    }

    #[test]
    fn test_non_monotonic_offsets() {
        let result = SparseMatrixCSR::new(
            3, 3,
            vec![0, 3, 2, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        assert!(matches!(
            result,
            Err(SparseError::NonMonotonicPointers { position: 2, .. })
        ));
    }

    #[test]
    fn test_column_out_of_bounds() {
        let result = SparseMatrixCSR::new(2, 2, vec![0, 1, 1], vec![2], vec![1]);
        assert!(matches!(
            result,
            Err(SparseError::IndexOutOfBounds { index: 2, bound: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_column_in_row() {
        let result = SparseMatrixCSR::new(1, 3, vec![0, 2], vec![1, 1], vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(SparseError::DuplicateEntry { row: 0, col: 1 })
        ));

        // Same column in different rows is fine, order inside a row is free
        let matrix = SparseMatrixCSR::new(2, 3, vec![0, 2, 3], vec![2, 0, 2], vec![1, 2, 3]);
        assert!(matrix.is_ok());
    }

    #[test]
    fn test_duplicate_reported_at_its_row() {
        let result = SparseMatrixCSR::new(
            3, 4,
            vec![0, 1, 2, 5],
            vec![3, 3, 0, 2, 0],
            vec![1, 1, 1, 1, 1],
        );
        assert!(matches!(
            result,
            Err(SparseError::DuplicateEntry { row: 2, col: 0 })
        ));
    }

    #[test]
    fn test_spmv_rejects_edited_offsets() {
        let mut matrix = SparseMatrixCSR::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![1.0, 1.0])
            .unwrap();
        matrix.row_ptr[2] = 1;

        assert!(matrix.validate().is_err());
        assert!(matches!(
            matrix.spmv(&vec![1.0, 1.0]),
            Err(SparseError::PointerNnzMismatch { last: 1, nnz: 2, .. })
        ));
    }

    #[test]
    fn test_spmv_rejects_edited_duplicate() {
        let mut matrix = sample();
        matrix.col_idx[1] = 0;

        assert!(matches!(
            matrix.spmv(&array![1, 1, 1]),
            Err(SparseError::DuplicateEntry { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_spmv_dense_result() {
        let matrix = sample();
        let y = matrix.spmv(&array![1, 1, 1]).unwrap();
        assert_eq!(y, array![3, 3, 9]);
    }

    #[test]
    fn test_spmv_empty_row_is_zero() {
        let matrix = SparseMatrixCSR::new(3, 3, vec![0, 1, 1, 2], vec![2, 0], vec![2.0, 3.0])
            .unwrap();
        let y = matrix.spmv(&vec![1.0, 5.0, 0.5]).unwrap();
        assert_eq!(y.to_vec(), vec![1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_spmv_missing_entry() {
        let matrix = sample();
        let v: SparseVector<i32> = [(0, 1), (1, 1)].into_iter().collect();
        assert!(matches!(
            matrix.spmv(&v),
            Err(SparseError::MissingVectorEntry { index: 2 })
        ));
    }

    #[test]
    fn test_spmv_dimension_mismatch() {
        let matrix = sample();
        assert!(matches!(
            matrix.spmv(&vec![1, 2]),
            Err(SparseError::DimensionMismatch { n_cols: 3, len: 2 })
        ));
    }
}
