//! Random sparse matrices and vectors for benchmark trials

use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use sprs::{CsMat, TriMat};
use tracing::debug;

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrixCSR;
use crate::vector::SparseVector;

/// Number of positions sampled for an `n × n` matrix at `density`
///
/// Negative or NaN densities request nothing. The product is taken in
/// floating point so huge `n` saturates instead of overflowing.
pub fn requested_nnz(n: usize, density: f64) -> usize {
    let n = n as f64;
    (n * n * density) as usize
}

/// Rejects entry values that would store zeros or non-finite numbers
pub fn check_entry_value(value: f64) -> Result<()> {
    if value.is_finite() && value != 0.0 {
        Ok(())
    } else {
        Err(SparseError::InvalidEntryValue(value))
    }
}

/// Generates an `n × n` CSR matrix with roughly `n² · density` entries
///
/// Row and column indices are drawn independently and uniformly from
/// `[0, n)`, every draw carrying `value`. Draws that land on the same
/// position are summed, so the realized nnz can fall short of the request.
/// The shortfall is kept as is.
///
/// # Errors
///
/// [`SparseError::InvalidEntryValue`] if `value` is zero, NaN or infinite.
pub fn generate_sparse_matrix<R>(
    n: usize,
    density: f64,
    value: f64,
    rng: &mut R,
) -> Result<SparseMatrixCSR<f64>>
where
    R: Rng + ?Sized,
{
    check_entry_value(value)?;

    let requested = requested_nnz(n, density);
    if n == 0 || requested == 0 {
        return Ok(SparseMatrixCSR::zeros(n, n));
    }

    let index_dist = Uniform::from(0..n);
    let rows: Vec<usize> = (0..requested).map(|_| index_dist.sample(rng)).collect();
    let cols: Vec<usize> = (0..requested).map(|_| index_dist.sample(rng)).collect();

    // TriMat sums duplicate positions when compressing
    let tri = TriMat::from_triplets((n, n), rows, cols, vec![value; requested]);
    let compressed: CsMat<f64> = tri.to_csr();
    let (row_ptr, col_idx, values) = compressed.into_raw_storage();

    let matrix = SparseMatrixCSR {
        n_rows: n,
        n_cols: n,
        row_ptr,
        col_idx,
        values,
    };

    if matrix.nnz() < requested {
        debug!(
            n,
            density,
            requested,
            realized = matrix.nnz(),
            "index collisions merged"
        );
    }

    Ok(matrix)
}

/// Dense vector of length `n` with entries uniform in `[-1, 1)`
pub fn generate_dense_vector<R>(n: usize, rng: &mut R) -> Array1<f64>
where
    R: Rng + ?Sized,
{
    let dist = Uniform::from(-1.0..1.0);
    Array1::from_iter((0..n).map(|_| dist.sample(rng)))
}

/// Same as [`generate_dense_vector`] in index→value form
pub fn generate_sparse_vector<R>(n: usize, rng: &mut R) -> SparseVector<f64>
where
    R: Rng + ?Sized,
{
    let dist = Uniform::from(-1.0..1.0);
    (0..n).map(|i| (i, dist.sample(rng))).collect()
}
