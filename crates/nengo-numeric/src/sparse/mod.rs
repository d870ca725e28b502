// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Sparse matrix layouts
//!
//! Seven physical layouts of the same logical object: a 2-D matrix of
//! `f64` values where only non-zero entries matter. [`SparseMatrix`] is a
//! closed enum over them; every layout can list its stored entries, and
//! every conversion goes through the canonical CSR form:
//!
//! - column indices strictly increasing within each row
//! - duplicates summed in ascending value order
//! - explicit zeros dropped
//!
//! Two matrices with the same logical entries have identical canonical
//! forms, whatever layout or insertion order they started from.

mod bsr;
mod coo;
mod csc;
mod csr;
mod dia;
mod dok;
mod lil;

pub use bsr::Bsr;
pub use coo::Coo;
pub use csc::Csc;
pub use csr::Csr;
pub use dia::Dia;
pub use dok::Dok;
pub use lil::Lil;

use std::fmt;

use ndarray::Array2;
use tracing::trace;

use crate::error::{NumericError, NumericResult};

/// One stored entry: `(row, col, value)`
pub type Entry = (usize, usize, f64);

/// Storage layout tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparseFormat {
    Csr,
    Csc,
    Coo,
    Bsr,
    Dok,
    Lil,
    Dia,
}

impl fmt::Display for SparseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SparseFormat::Csr => "csr",
            SparseFormat::Csc => "csc",
            SparseFormat::Coo => "coo",
            SparseFormat::Bsr => "bsr",
            SparseFormat::Dok => "dok",
            SparseFormat::Lil => "lil",
            SparseFormat::Dia => "dia",
        };
        f.write_str(name)
    }
}

/// A sparse matrix in any supported layout
#[derive(Debug, Clone, PartialEq)]
pub enum SparseMatrix {
    Csr(Csr),
    Csc(Csc),
    Coo(Coo),
    Bsr(Bsr),
    Dok(Dok),
    Lil(Lil),
    Dia(Dia),
}

impl SparseMatrix {
    pub fn format(&self) -> SparseFormat {
        match self {
            SparseMatrix::Csr(_) => SparseFormat::Csr,
            SparseMatrix::Csc(_) => SparseFormat::Csc,
            SparseMatrix::Coo(_) => SparseFormat::Coo,
            SparseMatrix::Bsr(_) => SparseFormat::Bsr,
            SparseMatrix::Dok(_) => SparseFormat::Dok,
            SparseMatrix::Lil(_) => SparseFormat::Lil,
            SparseMatrix::Dia(_) => SparseFormat::Dia,
        }
    }

    /// `(nrows, ncols)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            SparseMatrix::Csr(m) => m.shape(),
            SparseMatrix::Csc(m) => m.shape(),
            SparseMatrix::Coo(m) => m.shape(),
            SparseMatrix::Bsr(m) => m.shape(),
            SparseMatrix::Dok(m) => m.shape(),
            SparseMatrix::Lil(m) => m.shape(),
            SparseMatrix::Dia(m) => m.shape(),
        }
    }

    /// Number of stored values, explicit zeros and duplicates included
    pub fn stored_len(&self) -> usize {
        match self {
            SparseMatrix::Csr(m) => m.stored_len(),
            SparseMatrix::Csc(m) => m.stored_len(),
            SparseMatrix::Coo(m) => m.stored_len(),
            SparseMatrix::Bsr(m) => m.stored_len(),
            SparseMatrix::Dok(m) => m.stored_len(),
            SparseMatrix::Lil(m) => m.stored_len(),
            SparseMatrix::Dia(m) => m.stored_len(),
        }
    }

    /// Stored entries in the layout's own order
    pub fn entries(&self) -> Vec<Entry> {
        match self {
            SparseMatrix::Csr(m) => m.entries(),
            SparseMatrix::Csc(m) => m.entries(),
            SparseMatrix::Coo(m) => m.entries(),
            SparseMatrix::Bsr(m) => m.entries(),
            SparseMatrix::Dok(m) => m.entries(),
            SparseMatrix::Lil(m) => m.entries(),
            SparseMatrix::Dia(m) => m.entries(),
        }
    }

    /// Canonical CSR form of this matrix
    pub fn to_canonical(&self) -> Csr {
        match self {
            SparseMatrix::Csr(m) => m.to_canonical(),
            SparseMatrix::Csc(m) => m.to_canonical(),
            SparseMatrix::Coo(m) => m.to_canonical(),
            SparseMatrix::Bsr(m) => m.to_canonical(),
            SparseMatrix::Dok(m) => m.to_canonical(),
            SparseMatrix::Lil(m) => m.to_canonical(),
            SparseMatrix::Dia(m) => m.to_canonical(),
        }
    }

    /// Number of logical non-zeros
    pub fn nnz(&self) -> usize {
        self.to_canonical().stored_len()
    }

    pub fn to_csr(&self) -> Csr {
        self.to_canonical()
    }

    pub fn to_csc(&self) -> Csc {
        Csc::from_canonical(&self.to_canonical())
    }

    pub fn to_coo(&self) -> Coo {
        Coo::from_canonical(&self.to_canonical())
    }

    /// Block layout with `(rows, cols)` blocks
    ///
    /// # Errors
    /// Value error unless both block extents are non-zero and divide the shape.
    pub fn to_bsr(&self, blocksize: (usize, usize)) -> NumericResult<Bsr> {
        Bsr::from_canonical(&self.to_canonical(), blocksize)
    }

    pub fn to_dok(&self) -> Dok {
        Dok::from_canonical(&self.to_canonical())
    }

    pub fn to_lil(&self) -> Lil {
        Lil::from_canonical(&self.to_canonical())
    }

    pub fn to_dia(&self) -> Dia {
        Dia::from_canonical(&self.to_canonical())
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let (nrows, ncols) = self.shape();
        let mut dense = Array2::zeros((nrows, ncols));
        for (row, col, value) in self.to_canonical().entries() {
            dense[(row, col)] = value;
        }
        dense
    }
}

macro_rules! sparse_matrix_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for SparseMatrix {
                fn from(matrix: $variant) -> Self {
                    SparseMatrix::$variant(matrix)
                }
            }
        )*
    };
}

sparse_matrix_from!(Csr, Csc, Coo, Bsr, Dok, Lil, Dia);

/// Build the canonical CSR form from stored entries
///
/// Entries must already be in bounds; every layout validates that on construction.
pub(crate) fn canonicalize(
    format: SparseFormat,
    shape: (usize, usize),
    entries: Vec<Entry>,
) -> Csr {
    let (nrows, ncols) = shape;
    let stored = entries.len();

    let mut sorted = entries;
    // ties ordered by value, so float sums of duplicates do not depend on storage order
    sorted.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)).then(a.2.total_cmp(&b.2)));

    let mut indptr = vec![0usize; nrows + 1];
    let mut indices = Vec::with_capacity(sorted.len());
    let mut data = Vec::with_capacity(sorted.len());

    let mut iter = sorted.into_iter().peekable();
    while let Some((row, col, mut value)) = iter.next() {
        while let Some(&(next_row, next_col, next_value)) = iter.peek() {
            if next_row != row || next_col != col {
                break;
            }
            value += next_value;
            iter.next();
        }
        if value != 0.0 {
            indptr[row + 1] += 1;
            indices.push(col);
            data.push(value);
        }
    }
    for row in 0..nrows {
        indptr[row + 1] += indptr[row];
    }

    trace!(
        target: "nengo-numeric",
        "canonicalized {} matrix {}x{}: {} stored -> {} non-zeros",
        format,
        nrows,
        ncols,
        stored,
        data.len()
    );

    Csr::from_canonical_parts(nrows, ncols, indptr, indices, data)
}

/// Shared check for compressed layouts (`indptr` over `major` lanes, `indices` below `minor`)
pub(crate) fn check_compressed(
    major: usize,
    minor: usize,
    indptr: &[usize],
    indices: &[usize],
    data_len: usize,
    major_name: &str,
    minor_name: &str,
) -> NumericResult<()> {
    if indptr.len() != major + 1 {
        return Err(NumericError::value(format!(
            "indptr length must be n{} + 1",
            major_name
        )));
    }
    if indices.len() != data_len {
        return Err(NumericError::value("indices and data must have equal length"));
    }
    if indptr.first().copied().unwrap_or(0) != 0 {
        return Err(NumericError::value("indptr first element must be 0"));
    }
    if indptr.last().copied().unwrap_or(0) != indices.len() {
        return Err(NumericError::value("indptr last element must equal nnz"));
    }
    if indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(NumericError::value("indptr must be non-decreasing"));
    }
    if indices.iter().any(|&i| i >= minor) {
        return Err(NumericError::value(format!("{} index out of bounds", minor_name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Csr {
        // [[1, 0, 2],
        //  [0, 0, 3],
        //  [4, 5, 0]]
        Coo::from_parts(3, 3, vec![0, 0, 1, 2, 2], vec![0, 2, 2, 0, 1], vec![1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap()
            .to_canonical()
    }

    #[test]
    fn test_canonicalize_sums_duplicates_and_drops_zeros() {
        let entries = vec![(1, 2, 1.0), (0, 1, 0.0), (1, 2, 2.0), (1, 0, 4.0), (0, 0, -1.0), (0, 0, 1.0)];
        let csr = canonicalize(SparseFormat::Coo, (2, 3), entries);
        assert_eq!(csr.indptr(), &[0, 0, 2]);
        assert_eq!(csr.indices(), &[0, 2]);
        assert_eq!(csr.data(), &[4.0, 3.0]);
        assert!(csr.has_canonical_format());
    }

    #[test]
    fn test_duplicate_sum_ignores_storage_order() {
        let forward = canonicalize(SparseFormat::Coo, (1, 1), vec![(0, 0, 0.1), (0, 0, 0.2), (0, 0, 0.3)]);
        let backward = canonicalize(SparseFormat::Coo, (1, 1), vec![(0, 0, 0.3), (0, 0, 0.2), (0, 0, 0.1)]);
        let mixed = canonicalize(SparseFormat::Coo, (1, 1), vec![(0, 0, 0.2), (0, 0, 0.3), (0, 0, 0.1)]);
        assert_eq!(forward.data()[0].to_bits(), backward.data()[0].to_bits());
        assert_eq!(forward.data()[0].to_bits(), mixed.data()[0].to_bits());
    }

    #[test]
    fn test_every_layout_converges() {
        let matrix = SparseMatrix::from(sample());
        let canonical = matrix.to_canonical();
        let layouts: Vec<SparseMatrix> = vec![
            matrix.to_csc().into(),
            matrix.to_coo().into(),
            matrix.to_bsr((1, 1)).unwrap().into(),
            matrix.to_bsr((3, 3)).unwrap().into(),
            matrix.to_dok().into(),
            matrix.to_lil().into(),
            matrix.to_dia().into(),
        ];
        for layout in layouts {
            assert_eq!(layout.to_canonical(), canonical, "{} did not converge", layout.format());
            assert_eq!(layout.shape(), (3, 3));
            assert_eq!(layout.nnz(), 5);
        }
    }

    #[test]
    fn test_to_dense() {
        let dense = SparseMatrix::from(sample()).to_dense();
        assert_eq!(
            dense,
            ndarray::array![[1.0, 0.0, 2.0], [0.0, 0.0, 3.0], [4.0, 5.0, 0.0]]
        );
    }

    #[test]
    fn test_bsr_blocksize_must_divide_shape() {
        let matrix = SparseMatrix::from(sample());
        assert!(matrix.to_bsr((2, 2)).is_err());
        assert!(matrix.to_bsr((0, 1)).is_err());
    }

    #[test]
    fn test_format_names() {
        assert_eq!(SparseFormat::Lil.to_string(), "lil");
        assert_eq!(SparseMatrix::from(sample()).format(), SparseFormat::Csr);
    }
}
