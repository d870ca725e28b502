// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Diagonal layout

use std::collections::BTreeMap;

use ndarray::Array2;

use super::{canonicalize, Csr, Entry, SparseFormat};
use crate::error::{NumericError, NumericResult};

/// Stored diagonals
///
/// `data[[k, j]]` holds element `(j - offsets[k], j)`. Slots that fall
/// outside the matrix are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Dia {
    nrows: usize,
    ncols: usize,
    offsets: Vec<isize>,
    data: Array2<f64>,
}

impl Dia {
    pub fn from_parts(nrows: usize, ncols: usize, offsets: Vec<isize>, data: Array2<f64>) -> NumericResult<Self> {
        if data.nrows() != offsets.len() {
            return Err(NumericError::value("number of diagonals does not match number of offsets"));
        }
        let mut seen = offsets.clone();
        seen.sort_unstable();
        if seen.windows(2).any(|w| w[0] == w[1]) {
            return Err(NumericError::value("offset array contains duplicate values"));
        }
        Ok(Dia {
            nrows,
            ncols,
            offsets,
            data,
        })
    }

    pub(crate) fn from_canonical(csr: &Csr) -> Self {
        let (nrows, ncols) = csr.shape();
        let mut diagonals: BTreeMap<isize, Vec<(usize, f64)>> = BTreeMap::new();
        for (row, col, value) in csr.entries() {
            diagonals
                .entry(col as isize - row as isize)
                .or_default()
                .push((col, value));
        }

        let mut data = Array2::zeros((diagonals.len(), ncols));
        let mut offsets = Vec::with_capacity(diagonals.len());
        for (k, (offset, slots)) in diagonals.into_iter().enumerate() {
            offsets.push(offset);
            for (col, value) in slots {
                data[(k, col)] = value;
            }
        }
        Dia {
            nrows,
            ncols,
            offsets,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// In-bounds diagonal slots, explicit zeros included
    pub fn stored_len(&self) -> usize {
        self.entries().len()
    }

    pub fn entries(&self) -> Vec<Entry> {
        let width = self.data.ncols().min(self.ncols);
        let mut entries = Vec::new();
        for (k, &offset) in self.offsets.iter().enumerate() {
            for col in 0..width {
                let Some(row) = (col as isize).checked_sub(offset) else {
                    continue;
                };
                if row >= 0 && (row as usize) < self.nrows {
                    entries.push((row as usize, col, self.data[(k, col)]));
                }
            }
        }
        entries
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Dia, self.shape(), self.entries())
    }
}
