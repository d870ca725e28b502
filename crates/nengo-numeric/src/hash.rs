// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Structural hashing

Deterministic 64-bit digests (XXH64, seed 0) of dense arrays and sparse
matrices, used as cache keys.

- Dense arrays hash a header (tag, rank, shape, dtype) followed by the
  element bytes in logical row-major order, so memory layout does not
  matter: a Fortran-order copy or a strided view hashes like the
  contiguous original.
- Sparse matrices are reduced to canonical CSR first, so the layout,
  insertion order, duplicate entries and explicit zeros do not matter.

These are checksums, not cryptographic digests.
*/

use ndarray::{ArrayBase, Data, Dimension};
use rand::rngs::StdRng;
use rand::SeedableRng;
use xxhash_rust::xxh64::Xxh64;

use crate::array::NdBuffer;
use crate::element::Element;
use crate::sparse::{Bsr, Coo, Csc, Csr, Dia, Dok, Lil, SparseMatrix};

const SEED: u64 = 0;

const DENSE_TAG: &[u8] = b"nengo.dense";
const SPARSE_TAG: &[u8] = b"nengo.sparse";
const SAMPLED_TAG: &[u8] = b"nengo.sampled";

/// Values with a structural digest
pub trait ArrayHash {
    /// Feed everything that identifies this value into `hasher`
    fn feed_hash(&self, hasher: &mut Xxh64);

    /// Feed at most `sample_size` entries
    ///
    /// Must match [`ArrayHash::feed_hash`] when the value holds no more
    /// than `sample_size` entries.
    fn feed_sampled(&self, hasher: &mut Xxh64, sample_size: usize);
}

/// Full structural hash of `value`
pub fn array_hash<T: ArrayHash + ?Sized>(value: &T) -> u64 {
    let mut hasher = Xxh64::new(SEED);
    value.feed_hash(&mut hasher);
    hasher.digest()
}

/// Hash of a deterministic sample of at most `sample_size` entries
///
/// Equal to [`array_hash`] for values with `sample_size` entries or fewer.
/// The sample positions come from a `StdRng` seeded with the entry count.
pub fn array_hash_sampled<T: ArrayHash + ?Sized>(value: &T, sample_size: usize) -> u64 {
    let mut hasher = Xxh64::new(SEED);
    value.feed_sampled(&mut hasher, sample_size);
    hasher.digest()
}

fn feed_u64(hasher: &mut Xxh64, value: u64) {
    hasher.update(&value.to_le_bytes());
}

fn feed_str(hasher: &mut Xxh64, value: &str) {
    feed_u64(hasher, value.len() as u64);
    hasher.update(value.as_bytes());
}

fn feed_usizes(hasher: &mut Xxh64, values: &[usize]) {
    feed_u64(hasher, values.len() as u64);
    for &value in values {
        feed_u64(hasher, value as u64);
    }
}

/// Sorted distinct positions in `0..len`
fn sample_positions(len: usize, sample_size: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(len as u64);
    let mut positions = rand::seq::index::sample(&mut rng, len, sample_size).into_vec();
    positions.sort_unstable();
    positions
}

fn feed_dense_header(hasher: &mut Xxh64, shape: &[usize], dtype: &str) {
    hasher.update(DENSE_TAG);
    feed_usizes(hasher, shape);
    feed_str(hasher, dtype);
}

impl<A, S, D> ArrayHash for ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn feed_hash(&self, hasher: &mut Xxh64) {
        feed_dense_header(hasher, self.shape(), A::DTYPE);
        match self.as_slice() {
            Some(elements) => hasher.update(bytemuck::cast_slice(elements)),
            None => {
                for element in self.iter() {
                    hasher.update(bytemuck::bytes_of(element));
                }
            }
        }
    }

    fn feed_sampled(&self, hasher: &mut Xxh64, sample_size: usize) {
        let len = self.len();
        if len <= sample_size {
            return self.feed_hash(hasher);
        }

        feed_dense_header(hasher, self.shape(), A::DTYPE);
        hasher.update(SAMPLED_TAG);
        feed_u64(hasher, sample_size as u64);

        let positions = sample_positions(len, sample_size);
        match self.as_slice() {
            Some(elements) => {
                for &pos in &positions {
                    feed_u64(hasher, pos as u64);
                    hasher.update(bytemuck::bytes_of(&elements[pos]));
                }
            }
            None => {
                let mut wanted = positions.iter().copied().peekable();
                for (pos, element) in self.iter().enumerate() {
                    match wanted.peek() {
                        Some(&next) if next == pos => {
                            feed_u64(hasher, pos as u64);
                            hasher.update(bytemuck::bytes_of(element));
                            wanted.next();
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            }
        }
    }
}

impl<A: Element> ArrayHash for NdBuffer<A> {
    fn feed_hash(&self, hasher: &mut Xxh64) {
        self.as_array().feed_hash(hasher)
    }

    fn feed_sampled(&self, hasher: &mut Xxh64, sample_size: usize) {
        self.as_array().feed_sampled(hasher, sample_size)
    }
}

fn feed_sparse_header(hasher: &mut Xxh64, csr: &Csr) {
    let (nrows, ncols) = csr.shape();
    hasher.update(SPARSE_TAG);
    feed_usizes(hasher, &[nrows, ncols]);
    feed_str(hasher, f64::DTYPE);
}

fn feed_canonical(hasher: &mut Xxh64, csr: &Csr) {
    feed_sparse_header(hasher, csr);
    feed_usizes(hasher, csr.indptr());
    feed_usizes(hasher, csr.indices());
    for value in csr.data() {
        hasher.update(&value.to_le_bytes());
    }
}

fn feed_canonical_sampled(hasher: &mut Xxh64, csr: &Csr, sample_size: usize) {
    let nnz = csr.stored_len();
    if nnz <= sample_size {
        return feed_canonical(hasher, csr);
    }

    feed_sparse_header(hasher, csr);
    hasher.update(SAMPLED_TAG);
    feed_u64(hasher, sample_size as u64);

    let indptr = csr.indptr();
    for pos in sample_positions(nnz, sample_size) {
        // last row whose start is at or before `pos`
        let row = indptr.partition_point(|&start| start <= pos) - 1;
        feed_u64(hasher, row as u64);
        feed_u64(hasher, csr.indices()[pos] as u64);
        hasher.update(&csr.data()[pos].to_le_bytes());
    }
}

macro_rules! impl_sparse_hash {
    ($($layout:ty),*) => {
        $(
            impl ArrayHash for $layout {
                fn feed_hash(&self, hasher: &mut Xxh64) {
                    feed_canonical(hasher, &self.to_canonical())
                }

                fn feed_sampled(&self, hasher: &mut Xxh64, sample_size: usize) {
                    feed_canonical_sampled(hasher, &self.to_canonical(), sample_size)
                }
            }
        )*
    };
}

impl_sparse_hash!(SparseMatrix, Csr, Csc, Coo, Bsr, Dok, Lil, Dia);
