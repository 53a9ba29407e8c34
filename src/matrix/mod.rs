// Sparse matrix representations and conversions between them

pub mod conversion;
pub mod coo;
pub mod csc;
pub mod csr;
pub mod dict;
pub mod generator;
pub mod lil;

pub use coo::SparseMatrixCOO;
pub use csc::SparseMatrixCSC;
pub use csr::SparseMatrixCSR;
pub use dict::{DictMatrix, SparseResult};
pub use generator::{
    check_entry_value, generate_dense_vector, generate_sparse_matrix, generate_sparse_vector,
};
pub use lil::SparseMatrixLIL;

use crate::error::{Result, SparseError};

/// Which dimension a compressed layout groups its entries by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compressed {
    /// CSR: offsets per row, stored indices are columns
    Row,
    /// CSC: offsets per column, stored indices are rows
    Column,
}

impl Compressed {
    fn outer_axis(self) -> &'static str {
        match self {
            Compressed::Row => "row",
            Compressed::Column => "col",
        }
    }

    fn inner_axis(self) -> &'static str {
        match self {
            Compressed::Row => "column",
            Compressed::Column => "row",
        }
    }

    /// (row, col) of an entry given its outer and inner index
    fn position(self, outer: usize, inner: usize) -> (usize, usize) {
        match self {
            Compressed::Row => (outer, inner),
            Compressed::Column => (inner, outer),
        }
    }
}

/// Checks the invariants shared by CSR and CSC storage
///
/// Offsets must have `n_outer + 1` entries, start at zero, never decrease and
/// end at nnz. Stored indices must be below `n_inner` and unique within each
/// offset range; order inside a range is free.
pub(crate) fn validate_compressed(
    layout: Compressed,
    n_outer: usize,
    n_inner: usize,
    ptr: &[usize],
    indices: &[usize],
    n_values: usize,
) -> Result<()> {
    let outer_axis = layout.outer_axis();

    if ptr.len() != n_outer + 1 {
        return Err(SparseError::InvalidPointerLength {
            axis: outer_axis,
            expected: n_outer + 1,
            actual: ptr.len(),
        });
    }

    if indices.len() != n_values {
        return Err(SparseError::LengthMismatch {
            indices: indices.len(),
            values: n_values,
        });
    }

    if ptr[0] != 0 {
        return Err(SparseError::NonMonotonicPointers {
            axis: outer_axis,
            position: 0,
        });
    }

    if let Some(position) = ptr.windows(2).position(|w| w[1] < w[0]) {
        return Err(SparseError::NonMonotonicPointers {
            axis: outer_axis,
            position: position + 1,
        });
    }

    let last = ptr[n_outer];
    if last != indices.len() {
        return Err(SparseError::PointerNnzMismatch {
            axis: outer_axis,
            last,
            nnz: indices.len(),
        });
    }

    if let Some(&index) = indices.iter().find(|&&idx| idx >= n_inner) {
        return Err(SparseError::IndexOutOfBounds {
            axis: layout.inner_axis(),
            index,
            bound: n_inner,
        });
    }

    // last_seen[j] holds 1 + the outer index that last stored inner index j
    let mut last_seen = vec![0usize; n_inner];
    for outer in 0..n_outer {
        for &inner in &indices[ptr[outer]..ptr[outer + 1]] {
            if last_seen[inner] == outer + 1 {
                let (row, col) = layout.position(outer, inner);
                return Err(SparseError::DuplicateEntry { row, col });
            }
            last_seen[inner] = outer + 1;
        }
    }

    Ok(())
}

/// Checks a single (row, col) position against a shape
#[inline]
pub(crate) fn check_position(row: usize, col: usize, n_rows: usize, n_cols: usize) -> Result<()> {
    if row >= n_rows {
        return Err(SparseError::IndexOutOfBounds {
            axis: "row",
            index: row,
            bound: n_rows,
        });
    }
    if col >= n_cols {
        return Err(SparseError::IndexOutOfBounds {
            axis: "column",
            index: col,
            bound: n_cols,
        });
    }
    Ok(())
}
