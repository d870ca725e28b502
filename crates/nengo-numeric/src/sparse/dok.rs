// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dictionary-of-keys layout

use ahash::AHashMap;

use super::{canonicalize, Csr, Entry, SparseFormat};
use crate::error::{NumericError, NumericResult};

/// Hash map from `(row, col)` to value
///
/// Iteration order is unspecified; nothing downstream depends on it.
/// Assigning zero removes the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Dok {
    nrows: usize,
    ncols: usize,
    values: AHashMap<(usize, usize), f64>,
}

impl Dok {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Dok {
            nrows,
            ncols,
            values: AHashMap::new(),
        }
    }

    pub(crate) fn from_canonical(csr: &Csr) -> Self {
        let (nrows, ncols) = csr.shape();
        let mut values = AHashMap::with_capacity(csr.stored_len());
        for (row, col, value) in csr.entries() {
            values.insert((row, col), value);
        }
        Dok {
            nrows,
            ncols,
            values,
        }
    }

    /// # Errors
    /// Value error if `(row, col)` lies outside the matrix.
    pub fn insert(&mut self, row: usize, col: usize, value: f64) -> NumericResult<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(NumericError::value(format!(
                "index ({}, {}) out of bounds for shape ({}, {})",
                row, col, self.nrows, self.ncols
            )));
        }
        if value == 0.0 {
            self.values.remove(&(row, col));
        } else {
            self.values.insert((row, col), value);
        }
        Ok(())
    }

    /// Stored value, or zero
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values.get(&(row, col)).copied().unwrap_or(0.0)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn stored_len(&self) -> usize {
        self.values.len()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.values
            .iter()
            .map(|(&(row, col), &value)| (row, col, value))
            .collect()
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Dok, self.shape(), self.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut dok = Dok::new(3, 3);
        dok.insert(2, 1, 4.0).unwrap();
        dok.insert(0, 0, 1.0).unwrap();
        assert_eq!(dok.get(2, 1), 4.0);
        assert_eq!(dok.stored_len(), 2);

        dok.insert(2, 1, 0.0).unwrap();
        assert_eq!(dok.get(2, 1), 0.0);
        assert_eq!(dok.stored_len(), 1);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut dok = Dok::new(2, 2);
        assert!(dok.insert(2, 0, 1.0).is_err());
    }

    #[test]
    fn test_canonical_is_sorted() {
        let mut dok = Dok::new(2, 3);
        for (row, col) in [(1, 2), (0, 1), (1, 0), (0, 2)] {
            dok.insert(row, col, (row * 3 + col) as f64).unwrap();
        }
        let csr = dok.to_canonical();
        assert_eq!(csr.indptr(), &[0, 2, 4]);
        assert_eq!(csr.indices(), &[1, 2, 0, 2]);
    }
}
