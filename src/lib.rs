//! # spmv_bench: sparse matrix-vector products across storage formats
//!
//! Measures how long y = A·v takes when the sparse matrix A is held in
//! different storage formats.
//!
//! ## Overview
//!
//! The crate provides:
//!
//! - Five matrix representations: compressed row (CSR), compressed column
//!   (CSC), coordinate triplets (COO), list of rows (LIL), and a nested
//!   dictionary keyed by row then column
//! - Validated conversions from CSR into each of them
//! - A random matrix generator that targets a given density
//! - A sweep driver that times one product call per trial
//!
//! ## Result shape
//!
//! The array formats return a dense vector with one entry per row. The
//! dictionary products return a map holding only rows that store at least
//! one entry; empty rows are absent rather than zero.
//!
//! ## Usage
//!
//! ```
//! use spmv_bench::SparseMatrixCSR;
//! use ndarray::array;
//!
//! let a = SparseMatrixCSR::new(
//!     5, 5,
//!     vec![0, 0, 2, 3, 5, 5],
//!     vec![3, 4, 2, 0, 2],
//!     vec![1.0; 5],
//! ).unwrap();
//! let v = array![0.5, 1.0, 0.5, 2.0, 1.0];
//!
//! let y = a.spmv(&v).unwrap();
//! assert_eq!(y, array![0.0, 3.0, 0.5, 1.0, 0.0]);
//!
//! let y = a.to_dict().unwrap().dot(&v).unwrap();
//! assert_eq!(y.len(), 3);
//! assert_eq!(y[&1], 3.0);
//! ```
//!
//! Running a small sweep:
//!
//! ```
//! use spmv_bench::{run_benchmark, BenchConfig, Method};
//!
//! let config = BenchConfig::quick()
//!     .with_sizes(vec![50])
//!     .with_densities(vec![0.05])
//!     .with_repetitions(1)
//!     .with_methods(vec![Method::CompressedRow, Method::DictionaryDirect])
//!     .with_seed(7);
//!
//! let results = run_benchmark(&config).unwrap();
//! assert_eq!(results.samples(Method::CompressedRow, 50, 0.05).unwrap().len(), 1);
//! ```

pub mod bench;
pub mod constants;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod vector;

// Re-export primary components
pub use bench::{
    evaluate_all, kernel_for, run_benchmark, run_sweep, BenchConfig, BenchmarkResults, Method,
    ProductOutput, SampleStats, SpmvKernel, Workload,
};
pub use error::{Result, SparseError};
pub use matrix::{
    check_entry_value, generate_dense_vector, generate_sparse_matrix, generate_sparse_vector,
    DictMatrix, SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR, SparseMatrixLIL, SparseResult,
};
pub use utils::{from_sprs_csc, from_sprs_csr, to_sprs_csc, to_sprs_csr};
pub use vector::{DenseVector, SparseVector, VectorAccess};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
