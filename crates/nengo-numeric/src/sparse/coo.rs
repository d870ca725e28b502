// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Coordinate (triplet) layout

use super::{canonicalize, Csr, Entry, SparseFormat};
use crate::error::{NumericError, NumericResult};

/// Parallel `row`, `col`, `data` arrays in any order; repeated coordinates add up
#[derive(Debug, Clone, PartialEq)]
pub struct Coo {
    nrows: usize,
    ncols: usize,
    row: Vec<usize>,
    col: Vec<usize>,
    data: Vec<f64>,
}

impl Coo {
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        row: Vec<usize>,
        col: Vec<usize>,
        data: Vec<f64>,
    ) -> NumericResult<Self> {
        if row.len() != data.len() || col.len() != data.len() {
            return Err(NumericError::value("row/col/data must have equal length"));
        }
        if row.iter().any(|&i| i >= nrows) || col.iter().any(|&j| j >= ncols) {
            return Err(NumericError::value("indices out of bounds"));
        }
        Ok(Coo {
            nrows,
            ncols,
            row,
            col,
            data,
        })
    }

    pub(crate) fn from_canonical(csr: &Csr) -> Self {
        let (nrows, ncols) = csr.shape();
        let mut row = Vec::with_capacity(csr.stored_len());
        let mut col = Vec::with_capacity(csr.stored_len());
        let mut data = Vec::with_capacity(csr.stored_len());
        for (i, j, value) in csr.entries() {
            row.push(i);
            col.push(j);
            data.push(value);
        }
        Coo {
            nrows,
            ncols,
            row,
            col,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    pub fn row(&self) -> &[usize] {
        &self.row
    }

    pub fn col(&self) -> &[usize] {
        &self.col
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.data)
            .map(|((&i, &j), &value)| (i, j, value))
            .collect()
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Coo, self.shape(), self.entries())
    }
}
