//! Conversion functions between matrix formats
//!
//! Every converter preserves the logical entry set exactly. Sources are
//! validated first, so a malformed input fails with a structural error
//! instead of yielding a corrupted derived representation.

use std::collections::HashMap;

use num_traits::Num;

use crate::error::Result;
use crate::matrix::dict::RowMap;
use crate::matrix::{
    DictMatrix, SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR, SparseMatrixLIL,
};
use crate::utils::exclusive_scan;

/// Builds CSR arrays from triples already known to be unique and in range
///
/// Entries are bucketed by row with a counting pass and then sorted by
/// column within each row.
fn csr_from_unique_triplets<T, I, F>(
    n_rows: usize,
    n_cols: usize,
    nnz: usize,
    triplets: F,
) -> SparseMatrixCSR<T>
where
    T: Copy + Num,
    I: Iterator<Item = (usize, usize, T)>,
    F: Fn() -> I,
{
    let mut row_counts = vec![0; n_rows];
    for (row, _, _) in triplets() {
        row_counts[row] += 1;
    }
    let row_ptr = exclusive_scan(&row_counts);

    let mut col_idx = vec![0; nnz];
    let mut values = vec![T::zero(); nnz];
    let mut next = row_ptr.clone();

    for (row, col, val) in triplets() {
        let pos = next[row];
        col_idx[pos] = col;
        values[pos] = val;
        next[row] += 1;
    }

    for i in 0..n_rows {
        let (start, end) = (row_ptr[i], row_ptr[i + 1]);
        if end - start > 1 {
            let mut row: Vec<_> = col_idx[start..end]
                .iter()
                .copied()
                .zip(values[start..end].iter().copied())
                .collect();
            row.sort_unstable_by_key(|&(col, _)| col);
            for (k, (col, val)) in row.into_iter().enumerate() {
                col_idx[start + k] = col;
                values[start + k] = val;
            }
        }
    }

    SparseMatrixCSR {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    }
}

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Converts this CSR matrix to CSC format
    pub fn to_csc(&self) -> Result<SparseMatrixCSC<T>> {
        self.validate()?;

        // Count non-zeros per column
        let mut col_counts = vec![0; self.n_cols];
        for &col in &self.col_idx {
            col_counts[col] += 1;
        }

        // Compute column pointers via prefix sum
        let col_ptr = exclusive_scan(&col_counts);

        let nnz = self.nnz();
        let mut row_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        // Fill CSC matrix
        let mut temp_col_ptr = col_ptr.clone();

        for i in 0..self.n_rows {
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                let col = self.col_idx[idx];
                let pos = temp_col_ptr[col];

                row_idx[pos] = i;
                values[pos] = self.values[idx];

                temp_col_ptr[col] += 1;
            }
        }

        SparseMatrixCSC::new(self.n_rows, self.n_cols, col_ptr, row_idx, values)
    }

    /// Converts to coordinate triples in row-major order
    ///
    /// A column repeated within a row is reported as a duplicate entry.
    pub fn to_coo(&self) -> Result<SparseMatrixCOO<T>> {
        self.validate()?;

        let mut row_idx = Vec::with_capacity(self.nnz());
        for i in 0..self.n_rows {
            let len = self.row_ptr[i + 1] - self.row_ptr[i];
            row_idx.extend(std::iter::repeat(i).take(len));
        }

        SparseMatrixCOO::new(
            self.n_rows,
            self.n_cols,
            row_idx,
            self.col_idx.clone(),
            self.values.clone(),
        )
    }

    /// Converts to one column-ordered entry list per row
    pub fn to_lil(&self) -> Result<SparseMatrixLIL<T>> {
        self.validate()?;

        let rows = (0..self.n_rows)
            .map(|i| self.row_iter(i).map(|(col, &val)| (col, val)).collect())
            .collect();

        SparseMatrixLIL::new(self.n_cols, rows)
    }

    /// Converts to dictionary adjacency (row → {col → value})
    ///
    /// Every row `0..n_rows` is visited. A row whose offset range is empty is
    /// left out of the outer map entirely.
    pub fn to_dict(&self) -> Result<DictMatrix<T>> {
        self.validate()?;

        let mut rows: HashMap<usize, RowMap<T>> = HashMap::new();

        for i in 0..self.n_rows {
            let start = self.row_ptr[i];
            let end = self.row_ptr[i + 1];
            if start == end {
                continue;
            }

            // Columns are unique within a row once validated
            let cols: RowMap<T> = self.col_idx[start..end]
                .iter()
                .copied()
                .zip(self.values[start..end].iter().copied())
                .collect();
            rows.insert(i, cols);
        }

        Ok(DictMatrix::from_parts(self.n_rows, self.n_cols, rows))
    }
}

impl<T: Copy + Num> SparseMatrixCSC<T> {
    /// Converts this CSC matrix to CSR format
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<T>> {
        self.validate()?;

        // Count non-zeros per row
        let mut row_counts = vec![0; self.n_rows];
        for &row in &self.row_idx {
            row_counts[row] += 1;
        }

        // Compute row pointers via prefix sum
        let row_ptr = exclusive_scan(&row_counts);

        let nnz = self.nnz();
        let mut col_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        // Fill CSR matrix
        let mut temp_row_ptr = row_ptr.clone();

        for j in 0..self.n_cols {
            for idx in self.col_ptr[j]..self.col_ptr[j + 1] {
                let row = self.row_idx[idx];
                let pos = temp_row_ptr[row];

                col_idx[pos] = j;
                values[pos] = self.values[idx];

                temp_row_ptr[row] += 1;
            }
        }

        SparseMatrixCSR::new(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}

impl<T: Copy + Num> SparseMatrixCOO<T> {
    /// Converts to CSR with columns sorted inside each row
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<T>> {
        self.validate()?;
        Ok(csr_from_unique_triplets(
            self.n_rows,
            self.n_cols,
            self.nnz(),
            || self.triplets(),
        ))
    }
}

impl<T: Copy + Num> SparseMatrixLIL<T> {
    /// Converts to CSR; rows are already column-ordered
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<T>> {
        let mut row_ptr = Vec::with_capacity(self.n_rows() + 1);
        let mut col_idx = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());

        row_ptr.push(0);
        for i in 0..self.n_rows() {
            for &(col, val) in self.row(i) {
                col_idx.push(col);
                values.push(val);
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrixCSR::new(self.n_rows(), self.n_cols(), row_ptr, col_idx, values)
    }
}

impl<T: Copy + Num> DictMatrix<T> {
    /// Flattens the nested maps into coordinate triples
    pub fn to_coo(&self) -> Result<SparseMatrixCOO<T>> {
        SparseMatrixCOO::from_triplets(self.n_rows(), self.n_cols(), self.triplets())
    }

    /// Converts to CSR with columns sorted inside each row
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<T>> {
        Ok(csr_from_unique_triplets(
            self.n_rows(),
            self.n_cols(),
            self.nnz(),
            || self.triplets(),
        ))
    }
}
