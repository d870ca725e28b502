// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! List-of-lists layout

use super::{canonicalize, Csr, Entry, SparseFormat};
use crate::error::{NumericError, NumericResult};

/// One sorted column list and one value list per row
#[derive(Debug, Clone, PartialEq)]
pub struct Lil {
    ncols: usize,
    rows: Vec<Vec<usize>>,
    data: Vec<Vec<f64>>,
}

impl Lil {
    pub fn from_parts(ncols: usize, rows: Vec<Vec<usize>>, data: Vec<Vec<f64>>) -> NumericResult<Self> {
        if rows.len() != data.len() {
            return Err(NumericError::value("rows and data must have one list per row"));
        }
        for (cols, values) in rows.iter().zip(&data) {
            if cols.len() != values.len() {
                return Err(NumericError::value("row column and value lists must have equal length"));
            }
            if cols.iter().any(|&j| j >= ncols) {
                return Err(NumericError::value("column index out of bounds"));
            }
            if cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(NumericError::value(
                    "column indices must be strictly increasing within each row",
                ));
            }
        }
        Ok(Lil { ncols, rows, data })
    }

    pub(crate) fn from_canonical(csr: &Csr) -> Self {
        let (nrows, ncols) = csr.shape();
        let mut rows = Vec::with_capacity(nrows);
        let mut data = Vec::with_capacity(nrows);
        for row in 0..nrows {
            let (cols, values) = csr.row(row);
            rows.push(cols.to_vec());
            data.push(values.to_vec());
        }
        Lil { ncols, rows, data }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.ncols)
    }

    pub fn stored_len(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.rows
            .iter()
            .zip(&self.data)
            .enumerate()
            .flat_map(|(row, (cols, values))| {
                cols.iter().zip(values).map(move |(&col, &value)| (row, col, value))
            })
            .collect()
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Lil, self.shape(), self.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_ok() {
        let lil = Lil::from_parts(4, vec![vec![1, 3], vec![], vec![0]], vec![vec![1.0, 2.0], vec![], vec![3.0]])
            .unwrap();
        assert_eq!(lil.shape(), (3, 4));
        assert_eq!(lil.stored_len(), 3);
        assert_eq!(lil.entries(), vec![(0, 1, 1.0), (0, 3, 2.0), (2, 0, 3.0)]);
    }

    #[test]
    fn test_rows_must_be_sorted() {
        let err = Lil::from_parts(4, vec![vec![3, 1]], vec![vec![1.0, 2.0]]).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_ragged_lists() {
        assert!(Lil::from_parts(4, vec![vec![1]], vec![]).is_err());
        assert!(Lil::from_parts(4, vec![vec![1]], vec![vec![1.0, 2.0]]).is_err());
        assert!(Lil::from_parts(1, vec![vec![1]], vec![vec![1.0]]).is_err());
    }
}
