// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compressed sparse column layout

use super::{canonicalize, check_compressed, Csr, Entry, SparseFormat};
use crate::error::NumericResult;

/// Compressed sparse columns: the transpose of [`Csr`]'s arrangement
#[derive(Debug, Clone, PartialEq)]
pub struct Csc {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,  // length ncols + 1
    indices: Vec<usize>, // row indices per column
    data: Vec<f64>,
}

impl Csc {
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> NumericResult<Self> {
        check_compressed(ncols, nrows, &indptr, &indices, data.len(), "cols", "row")?;
        Ok(Csc {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        })
    }

    pub(crate) fn from_canonical(csr: &Csr) -> Self {
        let (nrows, ncols) = csr.shape();
        let mut indptr = vec![0usize; ncols + 1];
        for &col in csr.indices() {
            indptr[col + 1] += 1;
        }
        for col in 0..ncols {
            indptr[col + 1] += indptr[col];
        }

        let mut next = indptr.clone();
        let mut indices = vec![0usize; csr.stored_len()];
        let mut data = vec![0.0; csr.stored_len()];
        // rows are visited in order, so row indices come out sorted per column
        for (row, col, value) in csr.entries() {
            let slot = next[col];
            indices[slot] = row;
            data[slot] = value;
            next[col] += 1;
        }

        Csc {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        }
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

    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.data.len());
        for col in 0..self.ncols {
            for k in self.indptr[col]..self.indptr[col + 1] {
                entries.push((self.indices[k], col, self.data[k]));
            }
        }
        entries
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Csc, self.shape(), self.entries())
    }
}
