//! Utilities for converting between our matrix formats and sprs

use num_traits::Num;
use sprs::{CsMat, TriMat};

use crate::error::Result;
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

/// Converts our CSR matrix format to sprs CsMat format
///
/// Goes through `TriMat` so column order inside a row does not matter.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    matrix.validate()?;

    let mut tri = TriMat::with_capacity((matrix.n_rows, matrix.n_cols), matrix.nnz());
    for (i, j, v) in matrix.triplets() {
        tri.add_triplet(i, j, v);
    }

    Ok(tri.to_csr())
}

/// Converts our CSC matrix format to sprs CsMat format (as CSC)
pub fn to_sprs_csc<T>(matrix: &SparseMatrixCSC<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    matrix.validate()?;

    let mut tri = TriMat::with_capacity((matrix.n_rows, matrix.n_cols), matrix.nnz());
    for j in 0..matrix.n_cols {
        for (i, &v) in matrix.col_iter(j) {
            tri.add_triplet(i, j, v);
        }
    }

    Ok(tri.to_csc())
}

/// Converts sprs CsMat in CSR format to our SparseMatrixCSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<SparseMatrixCSR<T>>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}

/// Converts sprs CsMat in CSC format to our SparseMatrixCSC format
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> Result<SparseMatrixCSC<T>>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSC format
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::new(shape.0, shape.1, indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_csr() -> SparseMatrixCSR<f64> {
        SparseMatrixCSR::new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0f64, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_csr_roundtrip() {
        let original = sample_csr();

        let sprs_mat = to_sprs_csr(&original).unwrap();
        let roundtrip = from_sprs_csr(sprs_mat).unwrap();

        assert_eq!(roundtrip, original);
    }

    #[test]
    fn test_csc_roundtrip() {
        let original = SparseMatrixCSC::new(
            3, 3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1.0f64, 4.0, 2.0, 3.0, 5.0],
        )
        .unwrap();

        let sprs_mat = to_sprs_csc(&original).unwrap();
        assert!(sprs_mat.is_csc());
        let roundtrip = from_sprs_csc(sprs_mat).unwrap();

        assert_eq!(roundtrip, original);
    }

    #[test]
    fn test_unsorted_row_accepted() {
        let csr = SparseMatrixCSR::new(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0]).unwrap();
        let sprs_mat = to_sprs_csr(&csr).unwrap();
        assert_eq!(sprs_mat.get(0, 0), Some(&2.0));
        assert_eq!(sprs_mat.get(0, 2), Some(&1.0));
    }

    #[test]
    fn test_spmv_matches_sprs() {
        let csr = sample_csr();
        let v = array![1.0, -2.0, 0.5];

        let ours = csr.spmv(&v).unwrap();
        let reference = &to_sprs_csr(&csr).unwrap() * &v;

        for (a, b) in ours.iter().zip(reference.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
