// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Block sparse row layout

use std::collections::BTreeMap;

use ndarray::{Array2, Array3, Axis};

use super::{canonicalize, check_compressed, Csr, Entry, SparseFormat};
use crate::error::{NumericError, NumericResult};

/// Compressed rows of dense `(r, c)` blocks
///
/// Block row `b` holds block columns `indices[indptr[b]..indptr[b + 1]]`;
/// `data[k]` is the dense block stored at position `k`. Zeros inside a
/// stored block are explicit zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct Bsr {
    nrows: usize,
    ncols: usize,
    blocksize: (usize, usize),
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Array3<f64>,
}

fn check_blocksize(nrows: usize, ncols: usize, blocksize: (usize, usize)) -> NumericResult<()> {
    let (r, c) = blocksize;
    if r == 0 || c == 0 {
        return Err(NumericError::value("blocksize must be positive"));
    }
    if nrows % r != 0 || ncols % c != 0 {
        return Err(NumericError::value(format!(
            "shape ({}, {}) must be divisible by blocksize ({}, {})",
            nrows, ncols, r, c
        )));
    }
    Ok(())
}

impl Bsr {
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        blocksize: (usize, usize),
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Array3<f64>,
    ) -> NumericResult<Self> {
        check_blocksize(nrows, ncols, blocksize)?;
        let (_, block_rows, block_cols) = data.dim();
        if (block_rows, block_cols) != blocksize {
            return Err(NumericError::value("data blocks must match blocksize"));
        }
        let (r, c) = blocksize;
        check_compressed(
            nrows / r,
            ncols / c,
            &indptr,
            &indices,
            data.len_of(Axis(0)),
            "block rows",
            "block column",
        )?;
        Ok(Bsr {
            nrows,
            ncols,
            blocksize,
            indptr,
            indices,
            data,
        })
    }

    pub(crate) fn from_canonical(csr: &Csr, blocksize: (usize, usize)) -> NumericResult<Self> {
        let (nrows, ncols) = csr.shape();
        check_blocksize(nrows, ncols, blocksize)?;
        let (r, c) = blocksize;

        let mut indptr = vec![0usize];
        let mut indices = Vec::new();
        let mut flat = Vec::new();
        for block_row in 0..nrows / r {
            let mut blocks: BTreeMap<usize, Array2<f64>> = BTreeMap::new();
            for local_row in 0..r {
                let (cols, values) = csr.row(block_row * r + local_row);
                for (&col, &value) in cols.iter().zip(values) {
                    let block = blocks.entry(col / c).or_insert_with(|| Array2::zeros((r, c)));
                    block[(local_row, col % c)] = value;
                }
            }
            for (block_col, block) in blocks {
                indices.push(block_col);
                flat.extend(block.iter().copied());
            }
            indptr.push(indices.len());
        }

        let data = Array3::from_shape_vec((indices.len(), r, c), flat)
            .map_err(|e| NumericError::value(format!("block data: {}", e)))?;
        Ok(Bsr {
            nrows,
            ncols,
            blocksize,
            indptr,
            indices,
            data,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn blocksize(&self) -> (usize, usize) {
        self.blocksize
    }

    /// Stored values, counting every slot of every stored block
    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn entries(&self) -> Vec<Entry> {
        let (r, c) = self.blocksize;
        let mut entries = Vec::with_capacity(self.data.len());
        for block_row in 0..self.indptr.len().saturating_sub(1) {
            for k in self.indptr[block_row]..self.indptr[block_row + 1] {
                let block_col = self.indices[k];
                for i in 0..r {
                    for j in 0..c {
                        entries.push((block_row * r + i, block_col * c + j, self.data[[k, i, j]]));
                    }
                }
            }
        }
        entries
    }

    pub fn to_canonical(&self) -> Csr {
        canonicalize(SparseFormat::Bsr, self.shape(), self.entries())
    }
}
