// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Structural hashing of sparse matrices across layouts

use nengo_numeric::{array_hash, Coo, SparseMatrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Triplets = (Vec<usize>, Vec<usize>);

/// The four combinations of two index sets and two value sets, as COO
fn corpus(shape: (usize, usize), idxs: [Triplets; 2], data: [Vec<f64>; 2]) -> Vec<SparseMatrix> {
    let mut matrices = Vec::new();
    for (rows, cols) in &idxs {
        for values in &data {
            let coo = Coo::from_parts(shape.0, shape.1, rows.clone(), cols.clone(), values.clone()).unwrap();
            matrices.push(SparseMatrix::from(coo));
        }
    }
    matrices
}

fn small_corpus() -> Vec<SparseMatrix> {
    corpus(
        (5, 5),
        [
            (vec![0, 0, 1, 2, 3, 3, 4], vec![0, 2, 3, 4, 2, 4, 0]),
            (vec![0, 1, 1, 2, 3, 3, 4], vec![1, 2, 3, 4, 2, 4, 0]),
        ],
        [
            vec![1.0, 2.0, 1.5, 2.3, 1.2, 2.5, 1.8],
            vec![1.0, 1.0, 1.5, 2.3, 1.2, 2.5, 1.8],
        ],
    )
}

fn large_corpus() -> Vec<SparseMatrix> {
    let mut rng = StdRng::seed_from_u64(300);
    let (nrows, ncols, nnz) = (100, 100, 300);
    let mut positions = || {
        let flat = rand::seq::index::sample(&mut rng, nrows * ncols, nnz).into_vec();
        let rows: Vec<usize> = flat.iter().map(|p| p / ncols).collect();
        let cols: Vec<usize> = flat.iter().map(|p| p % ncols).collect();
        (rows, cols)
    };
    let idxs = [positions(), positions()];
    let data = [
        (0..nnz).map(|_| rng.gen_range(-1.0f64..1.0)).collect(),
        (0..nnz).map(|_| rng.gen_range(-1.0f64..1.0)).collect(),
    ];
    corpus((nrows, ncols), idxs, data)
}

/// Every matrix re-expressed in each layout
fn layouts(matrix: &SparseMatrix) -> Vec<SparseMatrix> {
    vec![
        matrix.to_csr().into(),
        matrix.to_csc().into(),
        matrix.to_coo().into(),
        matrix.to_bsr((1, 1)).unwrap().into(),
        matrix.to_dok().into(),
        matrix.to_lil().into(),
        matrix.to_dia().into(),
    ]
}

fn check_corpus(matrices: Vec<SparseMatrix>) {
    let mut hashes = Vec::new();
    for matrix in &matrices {
        let expected = array_hash(matrix);
        for layout in layouts(matrix) {
            assert_eq!(array_hash(&layout), array_hash(&layout), "{} not reproducible", layout.format());
            assert_eq!(array_hash(&layout), expected, "{} hash depends on layout", layout.format());
        }
        hashes.push(expected);
    }

    let mut unique = hashes.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), hashes.len(), "different matrices collided: {:?}", hashes);
}

#[test]
fn test_small_corpus() {
    check_corpus(small_corpus());
}

#[test]
fn test_large_corpus() {
    check_corpus(large_corpus());
}

#[test]
fn test_blocked_layout_of_even_matrix() {
    let matrix = SparseMatrix::from(
        Coo::from_parts(4, 6, vec![0, 1, 3, 3], vec![5, 0, 2, 3], vec![1.0, -1.0, 2.0, 0.5]).unwrap(),
    );
    let blocked = matrix.to_bsr((2, 3)).unwrap();
    assert_eq!(blocked.blocksize(), (2, 3));
    assert_eq!(array_hash(&blocked), array_hash(&matrix));
    assert_eq!(SparseMatrix::from(blocked).to_dense(), matrix.to_dense());
}

#[test]
fn test_shape_is_part_of_the_hash() {
    let small = Coo::from_parts(2, 2, vec![0], vec![0], vec![1.0]).unwrap();
    let padded = Coo::from_parts(3, 2, vec![0], vec![0], vec![1.0]).unwrap();
    assert_ne!(array_hash(&small), array_hash(&padded));
}

#[test]
fn test_fractional_duplicates_hash_the_same_in_any_order() {
    let forward = Coo::from_parts(1, 1, vec![0, 0, 0], vec![0, 0, 0], vec![0.1, 0.2, 0.3]).unwrap();
    let backward = Coo::from_parts(1, 1, vec![0, 0, 0], vec![0, 0, 0], vec![0.3, 0.2, 0.1]).unwrap();
    assert_eq!(forward.to_canonical(), backward.to_canonical());
    assert_eq!(array_hash(&forward), array_hash(&backward));
}
