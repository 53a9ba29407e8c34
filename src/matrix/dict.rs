//! Dictionary-adjacency sparse matrix: row → (column → value)
//!
//! Rows without stored entries are absent from the outer map. The vector
//! products inherit that property: their result is a sparse map holding one
//! key per stored row, so an all-zero row produces no key at all rather than
//! an explicit zero. Both products run in O(nnz) and never scan a row or
//! column range by dimension.

use std::collections::HashMap;
use std::ops::AddAssign;

use num_traits::Num;

use crate::error::{Result, SparseError};
use crate::matrix::check_position;
use crate::vector::{check_dim, VectorAccess};

/// Sparse product result: row → value, for stored rows only
pub type SparseResult<T> = HashMap<usize, T>;

/// Inner map of one row: column → value
pub type RowMap<T> = HashMap<usize, T>;

/// Sparse matrix backed by nested hash maps
#[derive(Debug, Clone, PartialEq)]
pub struct DictMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    rows: HashMap<usize, RowMap<T>>,
}

impl<T> DictMatrix<T>
where
    T: Copy + Num,
{
    /// Wraps nested maps as a matrix
    ///
    /// Empty inner maps are dropped so the omission invariant holds.
    /// Positions outside `n_rows × n_cols` are rejected.
    pub fn new(n_rows: usize, n_cols: usize, mut rows: HashMap<usize, RowMap<T>>) -> Result<Self> {
        rows.retain(|_, cols| !cols.is_empty());

        for (&row, cols) in &rows {
            for &col in cols.keys() {
                check_position(row, col, n_rows, n_cols)?;
            }
        }

        Ok(Self {
            n_rows,
            n_cols,
            rows,
        })
    }

    /// Builds a matrix from (row, col, value) triples
    ///
    /// A repeated position is a structural error.
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut rows: HashMap<usize, RowMap<T>> = HashMap::new();
        for (row, col, val) in triplets {
            check_position(row, col, n_rows, n_cols)?;
            if rows.entry(row).or_default().insert(col, val).is_some() {
                return Err(SparseError::DuplicateEntry { row, col });
            }
        }

        Ok(Self {
            n_rows,
            n_cols,
            rows,
        })
    }

    /// Assembles a matrix from rows the caller has already checked
    pub(crate) fn from_parts(
        n_rows: usize,
        n_cols: usize,
        rows: HashMap<usize, RowMap<T>>,
    ) -> Self {
        debug_assert!(rows.values().all(|cols| !cols.is_empty()));
        Self {
            n_rows,
            n_cols,
            rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    /// Number of rows holding at least one entry
    pub fn stored_rows(&self) -> usize {
        self.rows.len()
    }

    /// The outer map; no inner map is empty
    pub fn rows(&self) -> &HashMap<usize, RowMap<T>> {
        &self.rows
    }

    /// Inner map for `row`, or `None` if the row is all zero
    pub fn row(&self, row: usize) -> Option<&RowMap<T>> {
        self.rows.get(&row)
    }

    /// Iterates the (column, value) entries of `row`; empty for an all-zero row
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, &T)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, val)| (col, val)))
    }

    /// Stored value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.rows.get(&row)?.get(&col).copied()
    }

    /// Iterates stored entries in unspecified order
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, &val)| (row, col, val)))
    }

    pub fn into_rows(self) -> HashMap<usize, RowMap<T>> {
        self.rows
    }
}

impl<T> DictMatrix<T>
where
    T: Copy + Num + AddAssign,
{
    /// Direct product: one accumulator per stored row
    ///
    /// Computes `result[row] = Σ A[row][col] · v[col]` over each row's inner
    /// map. A column missing from `v` is a lookup error.
    pub fn dot<V>(&self, v: &V) -> Result<SparseResult<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        check_dim(v, self.n_cols)?;

        let mut result = HashMap::with_capacity(self.rows.len());
        for (&row, cols) in &self.rows {
            let mut acc = T::zero();
            for (&col, &val) in cols {
                acc += val * v.lookup(col)?;
            }
            result.insert(row, acc);
        }

        Ok(result)
    }

    /// Two-phase product: map every entry to a partial product, then reduce by row
    ///
    /// Produces the same key set as [`DictMatrix::dot`]; values agree up to
    /// summation order.
    pub fn dot_map<V>(&self, v: &V) -> Result<SparseResult<T>>
    where
        V: VectorAccess<T> + ?Sized,
    {
        check_dim(v, self.n_cols)?;

        let partials = self
            .triplets()
            .map(|(row, col, val)| v.lookup(col).map(|x| (row, val * x)))
            .collect::<Result<Vec<_>>>()?;

        let mut result: SparseResult<T> = HashMap::with_capacity(self.rows.len());
        for (row, partial) in partials {
            *result.entry(row).or_insert_with(T::zero) += partial;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::SparseVector;

    fn toy_vector() -> SparseVector<f64> {
        [(0, 0.5), (1, 1.0), (2, 0.5), (3, 2.0), (4, 1.0)]
            .into_iter()
            .collect()
    }

    fn toy_matrix() -> DictMatrix<f64> {
        // [[0,0,0,0,0],[0,0,0,1,1],[0,0,1,0,0],[1,0,1,0,0],[0,0,0,0,0]]
        DictMatrix::from_triplets(
            5,
            5,
            vec![(1, 3, 1.0), (1, 4, 1.0), (2, 2, 1.0), (3, 0, 1.0), (3, 2, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_toy_product() {
        let res = toy_matrix().dot(&toy_vector()).unwrap();
        assert_eq!(res.len(), 3);
        assert_eq!(res[&1], 3.0);
        assert_eq!(res[&2], 0.5);
        assert_eq!(res[&3], 1.0);
        assert!(!res.contains_key(&0));
        assert!(!res.contains_key(&4));
    }

    #[test]
    fn test_dot_map_matches_dot() {
        let m = toy_matrix();
        let v = toy_vector();
        assert_eq!(m.dot(&v).unwrap(), m.dot_map(&v).unwrap());
    }

    #[test]
    fn test_empty_inner_maps_dropped() {
        let mut rows = HashMap::new();
        rows.insert(0, RowMap::new());
        rows.insert(1, [(0, 2.0)].into_iter().collect());
        let m = DictMatrix::new(2, 2, rows).unwrap();

        assert_eq!(m.stored_rows(), 1);
        assert!(m.row(0).is_none());
        let res = m.dot(&vec![1.0, 1.0]).unwrap();
        assert_eq!(res.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_missing_vector_entry_is_error() {
        let m = toy_matrix();
        let mut v = toy_vector();
        v.remove(&4);

        assert!(matches!(
            m.dot(&v),
            Err(SparseError::MissingVectorEntry { index: 4 })
        ));
        assert!(matches!(
            m.dot_map(&v),
            Err(SparseError::MissingVectorEntry { index: 4 })
        ));
    }

    #[test]
    fn test_duplicate_triplet_rejected() {
        let result = DictMatrix::from_triplets(2, 2, vec![(0, 0, 1.0), (0, 0, 1.0)]);
        assert!(matches!(
            result,
            Err(SparseError::DuplicateEntry { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut rows = HashMap::new();
        rows.insert(0, [(7, 1.0)].into_iter().collect());
        assert!(DictMatrix::new(2, 2, rows).is_err());
    }

    #[test]
    fn test_accessors() {
        let m = toy_matrix();
        assert_eq!(m.nnz(), 5);
        assert_eq!(m.get(3, 2), Some(1.0));
        assert_eq!(m.get(0, 0), None);
        assert_eq!((m.n_rows(), m.n_cols()), (5, 5));

        let mut row: Vec<_> = m.row_iter(1).map(|(col, &val)| (col, val)).collect();
        row.sort_by_key(|&(col, _)| col);
        assert_eq!(row, vec![(3, 1.0), (4, 1.0)]);
        assert_eq!(m.row_iter(4).count(), 0);
    }
}
