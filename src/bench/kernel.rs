//! Pluggable product strategies, one per benchmarked method
//!
//! A kernel has two halves. [`SpmvKernel::prepare`] converts the generated
//! CSR matrix and dense vector into whatever the method consumes; it runs
//! outside the timed window. [`PreparedProduct::execute`] is the single call
//! the driver times. Adding a format means adding a kernel; the sweep loop is
//! shared.

use std::collections::HashMap;

use ndarray::Array1;

use crate::bench::method::Method;
use crate::error::Result;
use crate::matrix::{
    DictMatrix, SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR, SparseMatrixLIL, SparseResult,
};
use crate::vector::{to_sparse_vector, SparseVector};

/// Result of one product
#[derive(Debug, Clone, PartialEq)]
pub enum ProductOutput {
    /// One value per matrix row, empty rows included
    Dense(Array1<f64>),
    /// One value per stored row only
    Sparse(SparseResult<f64>),
}

impl ProductOutput {
    /// Number of values held
    pub fn len(&self) -> usize {
        match self {
            ProductOutput::Dense(y) => y.len(),
            ProductOutput::Sparse(y) => y.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value for `row`; a sparse result has none for rows it omits
    pub fn get(&self, row: usize) -> Option<f64> {
        match self {
            ProductOutput::Dense(y) => y.get(row).copied(),
            ProductOutput::Sparse(y) => y.get(&row).copied(),
        }
    }

    /// Expands to a dense vector of length `n_rows`, omitted rows as zero
    ///
    /// For comparing outputs across methods only; the timed result is left
    /// in its native form.
    pub fn to_dense(&self, n_rows: usize) -> Array1<f64> {
        match self {
            ProductOutput::Dense(y) => y.clone(),
            ProductOutput::Sparse(y) => {
                let mut dense = Array1::zeros(n_rows);
                for (&row, &val) in y {
                    dense[row] = val;
                }
                dense
            }
        }
    }
}

/// A matrix and vector ready for the timed product
pub trait PreparedProduct {
    /// Entries stored by the prepared representation
    fn nnz(&self) -> usize;

    /// Runs the product once
    fn execute(&self) -> Result<ProductOutput>;
}

/// Strategy for one benchmarked method
pub trait SpmvKernel {
    fn method(&self) -> Method;

    /// Builds the method's representation of `matrix` and `vector`
    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>>;
}

/// Returns the kernel implementing `method`
pub fn kernel_for(method: Method) -> Box<dyn SpmvKernel> {
    match method {
        Method::CompressedRow => Box::new(CsrKernel),
        Method::CompressedColumn => Box::new(CscKernel),
        Method::Coordinate => Box::new(CooKernel),
        Method::ListOfRows => Box::new(LilKernel),
        Method::DictionaryDirect => Box::new(DictDirectKernel),
        Method::DictionaryMapReduce => Box::new(DictMapReduceKernel),
    }
}

// ----------------------------------------------------------------------------
// Compressed row
// ----------------------------------------------------------------------------

pub struct CsrKernel;

/// Holds a matrix that passed `validate` in `prepare`
struct CsrProduct<'a> {
    matrix: &'a SparseMatrixCSR<f64>,
    vector: &'a Array1<f64>,
}

impl PreparedProduct for CsrProduct<'_> {
    fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    fn execute(&self) -> Result<ProductOutput> {
        self.matrix.spmv_validated(self.vector).map(ProductOutput::Dense)
    }
}

impl SpmvKernel for CsrKernel {
    fn method(&self) -> Method {
        Method::CompressedRow
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        matrix.validate()?;
        Ok(Box::new(CsrProduct { matrix, vector }))
    }
}

// ----------------------------------------------------------------------------
// Compressed column
// ----------------------------------------------------------------------------

pub struct CscKernel;

struct CscProduct<'a> {
    matrix: SparseMatrixCSC<f64>,
    vector: &'a Array1<f64>,
}

impl PreparedProduct for CscProduct<'_> {
    fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    fn execute(&self) -> Result<ProductOutput> {
        self.matrix.spmv_validated(self.vector).map(ProductOutput::Dense)
    }
}

impl SpmvKernel for CscKernel {
    fn method(&self) -> Method {
        Method::CompressedColumn
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        Ok(Box::new(CscProduct {
            matrix: matrix.to_csc()?,
            vector,
        }))
    }
}

// ----------------------------------------------------------------------------
// Coordinate
// ----------------------------------------------------------------------------

pub struct CooKernel;

struct CooProduct<'a> {
    matrix: SparseMatrixCOO<f64>,
    vector: &'a Array1<f64>,
}

impl PreparedProduct for CooProduct<'_> {
    fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    fn execute(&self) -> Result<ProductOutput> {
        self.matrix.spmv_validated(self.vector).map(ProductOutput::Dense)
    }
}

impl SpmvKernel for CooKernel {
    fn method(&self) -> Method {
        Method::Coordinate
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        Ok(Box::new(CooProduct {
            matrix: matrix.to_coo()?,
            vector,
        }))
    }
}

// ----------------------------------------------------------------------------
// List of rows
// ----------------------------------------------------------------------------

pub struct LilKernel;

struct LilProduct<'a> {
    matrix: SparseMatrixLIL<f64>,
    vector: &'a Array1<f64>,
}

impl PreparedProduct for LilProduct<'_> {
    fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    fn execute(&self) -> Result<ProductOutput> {
        self.matrix.spmv(self.vector).map(ProductOutput::Dense)
    }
}

impl SpmvKernel for LilKernel {
    fn method(&self) -> Method {
        Method::ListOfRows
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        Ok(Box::new(LilProduct {
            matrix: matrix.to_lil()?,
            vector,
        }))
    }
}

// ----------------------------------------------------------------------------
// Dictionary adjacency
// ----------------------------------------------------------------------------

/// Both dictionary variants share the prepared form: the nested-map matrix
/// and the index→value vector
struct DictProduct {
    matrix: DictMatrix<f64>,
    vector: SparseVector<f64>,
    map_reduce: bool,
}

impl PreparedProduct for DictProduct {
    fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    fn execute(&self) -> Result<ProductOutput> {
        let result = if self.map_reduce {
            self.matrix.dot_map(&self.vector)?
        } else {
            self.matrix.dot(&self.vector)?
        };
        Ok(ProductOutput::Sparse(result))
    }
}

fn prepare_dict(
    matrix: &SparseMatrixCSR<f64>,
    vector: &Array1<f64>,
    map_reduce: bool,
) -> Result<Box<dyn PreparedProduct + 'static>> {
    Ok(Box::new(DictProduct {
        matrix: matrix.to_dict()?,
        vector: to_sparse_vector(vector),
        map_reduce,
    }))
}

pub struct DictDirectKernel;

impl SpmvKernel for DictDirectKernel {
    fn method(&self) -> Method {
        Method::DictionaryDirect
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        prepare_dict(matrix, vector, false)
    }
}

pub struct DictMapReduceKernel;

impl SpmvKernel for DictMapReduceKernel {
    fn method(&self) -> Method {
        Method::DictionaryMapReduce
    }

    fn prepare<'a>(
        &self,
        matrix: &'a SparseMatrixCSR<f64>,
        vector: &'a Array1<f64>,
    ) -> Result<Box<dyn PreparedProduct + 'a>> {
        prepare_dict(matrix, vector, true)
    }
}

/// Runs every kernel once on the same inputs, untimed
///
/// Used to cross-check that all methods agree on a matrix.
pub fn evaluate_all(
    matrix: &SparseMatrixCSR<f64>,
    vector: &Array1<f64>,
) -> Result<HashMap<Method, ProductOutput>> {
    Method::ALL
        .into_iter()
        .map(|method| -> Result<(Method, ProductOutput)> {
            let prepared = kernel_for(method).prepare(matrix, vector)?;
            Ok((method, prepared.execute()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SparseError;
    use ndarray::array;

    fn toy() -> (SparseMatrixCSR<f64>, Array1<f64>) {
        // [[0,0,0,0,0],[0,0,0,1,1],[0,0,1,0,0],[1,0,1,0,0],[0,0,0,0,0]]
        let matrix = SparseMatrixCSR::new(
            5,
            5,
            vec![0, 0, 2, 3, 5, 5],
            vec![3, 4, 2, 0, 2],
            vec![1.0; 5],
        )
        .unwrap();
        (matrix, array![0.5, 1.0, 0.5, 2.0, 1.0])
    }

    #[test]
    fn test_kernel_for_matches_method() {
        for method in Method::ALL {
            assert_eq!(kernel_for(method).method(), method);
        }
    }

    #[test]
    fn test_all_methods_agree_on_toy() {
        let (matrix, v) = toy();
        let outputs = evaluate_all(&matrix, &v).unwrap();
        let expected = array![0.0, 3.0, 0.5, 1.0, 0.0];

        for (method, output) in &outputs {
            assert_eq!(output.to_dense(5), expected, "{method}");
        }
    }

    #[test]
    fn test_result_shape_per_method() {
        let (matrix, v) = toy();
        let outputs = evaluate_all(&matrix, &v).unwrap();

        for (method, output) in &outputs {
            if method.has_sparse_result() {
                assert_eq!(output.len(), 3);
                assert_eq!(output.get(0), None);
                assert_eq!(output.get(4), None);
            } else {
                assert_eq!(output.len(), 5);
                assert_eq!(output.get(4), Some(0.0));
            }
        }
    }

    #[test]
    fn test_prepared_nnz() {
        let (matrix, v) = toy();
        for method in Method::ALL {
            let prepared = kernel_for(method).prepare(&matrix, &v).unwrap();
            assert_eq!(prepared.nnz(), 5);
        }
    }

    #[test]
    fn test_short_vector_fails_every_method() {
        let (matrix, _) = toy();
        let short = array![1.0, 1.0, 1.0];

        for method in Method::ALL {
            let prepared = kernel_for(method).prepare(&matrix, &short).unwrap();
            let err = prepared.execute().unwrap_err();
            assert!(
                matches!(
                    err,
                    SparseError::DimensionMismatch { .. } | SparseError::MissingVectorEntry { .. }
                ),
                "{method}: {err}"
            );
        }
    }

    #[test]
    fn test_duplicate_column_rejected_by_every_method() {
        let (mut matrix, v) = toy();
        // Row 3 now stores column 0 twice
        matrix.col_idx[4] = 0;

        for method in Method::ALL {
            let err = match kernel_for(method).prepare(&matrix, &v) {
                Ok(_) => panic!("{method}: duplicate column accepted"),
                Err(err) => err,
            };
            assert!(
                matches!(err, SparseError::DuplicateEntry { row: 3, col: 0 }),
                "{method}: {err}"
            );
        }
    }

    #[test]
    fn test_malformed_matrix_rejected_in_prepare() {
        let (mut matrix, v) = toy();
        matrix.row_ptr[2] = 4;

        for method in Method::ALL {
            assert!(kernel_for(method).prepare(&matrix, &v).is_err(), "{method}");
        }
    }
}
