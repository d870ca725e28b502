// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compressed sparse row layout

use super::{canonicalize, check_compressed, Entry, SparseFormat};
use crate::error::NumericResult;

/// Compressed sparse rows
///
/// Row `i` stores `indices[indptr[i]..indptr[i + 1]]` with the matching
/// `data`. Column indices may be unsorted or repeated (repeats add up),
/// and zeros may be stored explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Csr {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl Csr {
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> NumericResult<Self> {
        check_compressed(nrows, ncols, &indptr, &indices, data.len(), "rows", "column")?;
        Ok(Csr {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        })
    }

    pub(crate) fn from_canonical_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> Self {
        Csr {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        }
    }

    /// Empty matrix of the given shape
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Csr::from_canonical_parts(nrows, ncols, vec![0; nrows + 1], Vec::new(), Vec::new())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Column indices and values of row `row`
    pub(crate) fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let range = self.indptr[row]..self.indptr[row + 1];
        (&self.indices[range.clone()], &self.data[range])
    }

    pub fn entries(&self) -> Vec<Entry> {
        (0..self.nrows)
            .flat_map(|row| {
                let (cols, values) = self.row(row);
                cols.iter().zip(values).map(move |(&col, &value)| (row, col, value))
            })
            .collect()
    }

    /// Sorted, duplicate-free rows without explicit zeros
    pub fn has_canonical_format(&self) -> bool {
        let rows_sorted = (0..self.nrows).all(|row| self.row(row).0.windows(2).all(|w| w[0] < w[1]));
        rows_sorted && self.data.iter().all(|&v| v != 0.0)
    }

    pub fn to_canonical(&self) -> Csr {
        if self.has_canonical_format() {
            return self.clone();
        }
        canonicalize(SparseFormat::Csr, self.shape(), self.entries())
    }
}
