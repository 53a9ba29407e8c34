//! Compressed Sparse Column (CSC) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use ndarray::Array1;
use num_traits::Num;

use crate::error::Result;
use crate::matrix::{validate_compressed, Compressed};
use crate::vector::{check_dim, VectorAccess};

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The CSC format stores a sparse matrix using three arrays:
/// - col_ptr: Array of size n_cols + 1 containing indices into row_idx and values arrays
/// - row_idx: Array of size nnz containing row indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSC<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Column pointers (size: n_cols + 1)
    /// col_ptr[j] is the index in row_idx and values where column j starts
    /// col_ptr[n_cols] is equal to nnz
    pub col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num,
{
    /// Creates a new CSC matrix with the given dimensions and data
    ///
    /// # Errors
    ///
    /// Returns a structural error if the input arrays are inconsistent:
    /// - col_ptr.len() must be n_cols + 1
    /// - col_ptr must start at 0 and never decrease
    /// - row_idx.len() must equal values.len()
    /// - col_ptr[n_cols] must equal row_idx.len()
    /// - every row index must be below n_rows
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        validate_compressed(
            Compressed::Column,
            n_cols,
            n_rows,
            &col_ptr,
            &row_idx,
            values.len(),
        )?;

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Re-checks the structural invariants of this matrix
    pub fn validate(&self) -> Result<()> {
        validate_compressed(
            Compressed::Column,
            self.n_cols,
            self.n_rows,
            &self.col_ptr,
            &self.row_idx,
            self.values.len(),
        )
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];

        self.row_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&row, val)| (row, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num + AddAssign,
{
    /// Matrix-vector product y = A·v
    ///
    /// Walks columns and scatters `value * v[col]` into the output rows.
    /// Columns with no stored entries never touch the vector. The structure
    /// is re-checked first.
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
        for j in 0..self.n_cols {
            let start = self.col_ptr[j];
            let end = self.col_ptr[j + 1];
            if start == end {
                continue;
            }

            let x = v.lookup(j)?;
            for idx in start..end {
                y[self.row_idx[idx]] += self.values[idx] * x;
            }
        }

        Ok(y)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_cols_to_print = 5.min(self.n_cols);

        if max_cols_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for j in 0..max_cols_to_print {
                write!(f, "    col {}: ", j)?;
                let entries: Vec<_> = self.col_iter(j).take(5).collect();

                if entries.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    for (row, val) in entries {
                        write!(f, "({}, {:?}) ", row, val)?;
                    }
                    writeln!(f)?;
                }
            }

            if self.n_cols > max_cols_to_print {
                writeln!(f, "    ... ({} more columns)", self.n_cols - max_cols_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
