//! List-of-rows (LIL) format: one column-ordered list of (col, value) per row

use std::ops::AddAssign;

use ndarray::Array1;
use num_traits::Num;

use crate::error::{Result, SparseError};
use crate::vector::{check_dim, VectorAccess};

#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrixLIL<T> {
    n_rows: usize,
    n_cols: usize,
    /// `rows[i]` holds row i's entries sorted by column
    rows: Vec<Vec<(usize, T)>>,
}

impl<T> SparseMatrixLIL<T>
where
    T: Copy + Num,
{
    /// Creates a LIL matrix; each row is sorted by column on the way in
    ///
    /// Column indices must be below `n_cols` and unique within a row.
    pub fn new(n_cols: usize, mut rows: Vec<Vec<(usize, T)>>) -> Result<Self> {
        for (i, row) in rows.iter_mut().enumerate() {
            row.sort_unstable_by_key(|&(col, _)| col);

            if let Some(&(col, _)) = row.last() {
                if col >= n_cols {
                    return Err(SparseError::IndexOutOfBounds {
                        axis: "column",
                        index: col,
                        bound: n_cols,
                    });
                }
            }
            if let Some(w) = row.windows(2).find(|w| w[0].0 == w[1].0) {
                return Err(SparseError::DuplicateEntry { row: i, col: w[0].0 });
            }
        }

        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Entries of row i in column order
    pub fn row(&self, i: usize) -> &[(usize, T)] {
        &self.rows[i]
    }

    /// Iterates every stored entry as (row, col, value), row by row
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |&(col, val)| (i, col, val)))
    }
}

impl<T> SparseMatrixLIL<T>
where
    T: Copy + Num + AddAssign,
{
    /// Matrix-vector product y = A·v; empty rows yield zero
    pub fn spmv<V>(&self, v: &V) -> Result<Array1<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        check_dim(v, self.n_cols)?;

        let mut y = Array1::zeros(self.n_rows);
        for (out, row) in y.iter_mut().zip(&self.rows) {
            let mut acc = T::zero();
            for &(col, val) in row {
                acc += val * v.lookup(col)?;
            }
            *out = acc;
        }

        Ok(y)
    }
}
