//! Uniform index→value access over dense and sparse vectors
//!
//! Every product operation reads its right-hand side through [`VectorAccess`],
//! so a dense `ndarray` vector, a plain slice and a hash map keyed by index are
//! interchangeable inputs. A missing index is an error, never an implicit zero.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use ndarray::Array1;

use crate::error::{Result, SparseError};

/// Dense vector representation
pub type DenseVector<T> = Array1<T>;

/// Sparse vector representation: index → value
pub type SparseVector<T> = HashMap<usize, T>;

/// Indexed lookup into a vector
pub trait VectorAccess<T> {
    /// Value stored at `index`, if the vector provides one
    fn get(&self, index: usize) -> Option<T>;

    /// Declared length for dense vectors; `None` for index maps
    fn dim(&self) -> Option<usize> {
        None
    }

    /// Value at `index`, or a lookup error
    #[inline]
    fn lookup(&self, index: usize) -> Result<T> {
        self.get(index)
            .ok_or(SparseError::MissingVectorEntry { index })
    }
}

impl<T: Copy> VectorAccess<T> for [T] {
    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        <[T]>::get(self, index).copied()
    }

    fn dim(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Copy> VectorAccess<T> for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        self.as_slice().get(index).copied()
    }

    fn dim(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Copy> VectorAccess<T> for Array1<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        ndarray::ArrayBase::get(self, index).copied()
    }

    fn dim(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Copy, S: BuildHasher> VectorAccess<T> for HashMap<usize, T, S> {
    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        HashMap::get(self, &index).copied()
    }
}

impl<T: Copy> VectorAccess<T> for BTreeMap<usize, T> {
    #[inline]
    fn get(&self, index: usize) -> Option<T> {
        BTreeMap::get(self, &index).copied()
    }
}

/// Fails when a dense vector's length differs from `n_cols`
pub fn check_dim<T, V>(v: &V, n_cols: usize) -> Result<()>
where
    V: VectorAccess<T> + ?Sized,
{
    match v.dim() {
        Some(len) if len != n_cols => Err(SparseError::DimensionMismatch { n_cols, len }),
        _ => Ok(()),
    }
}

/// Builds the index map form of a dense vector
pub fn to_sparse_vector<T: Copy>(v: &Array1<T>) -> SparseVector<T> {
    v.iter().copied().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dense_lookup() {
        let v = array![0.5, 1.0, 2.0];
        assert_eq!(VectorAccess::get(&v, 1), Some(1.0));
        assert_eq!(VectorAccess::get(&v, 3), None);
        assert_eq!(VectorAccess::dim(&v), Some(3));
    }

    #[test]
    fn test_map_lookup_has_no_default() {
        let v: SparseVector<f64> = [(0, 0.5), (4, 1.0)].into_iter().collect();
        assert_eq!(v.lookup(4).unwrap(), 1.0);
        assert!(matches!(
            v.lookup(2),
            Err(SparseError::MissingVectorEntry { index: 2 })
        ));
        assert_eq!(VectorAccess::dim(&v), None);
    }

    #[test]
    fn test_check_dim() {
        let v = vec![1.0, 2.0];
        assert!(check_dim::<f64, _>(&v, 2).is_ok());
        assert!(matches!(
            check_dim::<f64, _>(&v, 3),
            Err(SparseError::DimensionMismatch { n_cols: 3, len: 2 })
        ));

        let sparse: SparseVector<f64> = HashMap::new();
        assert!(check_dim::<f64, _>(&sparse, 100).is_ok());
    }

    #[test]
    fn test_to_sparse_vector() {
        let v = array![3.0, 0.0, -1.0];
        let s = to_sparse_vector(&v);
        assert_eq!(s.len(), 3);
        assert_eq!(s[&2], -1.0);
    }
}
