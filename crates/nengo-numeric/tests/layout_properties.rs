// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property tests: storage order and layout never change the canonical form

use nengo_numeric::{array_hash, Coo, SparseMatrix};
use proptest::prelude::*;

const N: usize = 6;

/// Tenths, whose duplicate sums round differently depending on summation order
fn triplets() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    let value = prop_oneof![Just(0.0), (-40i32..=40).prop_map(|v| f64::from(v) / 10.0)];
    prop::collection::vec((0..N, 0..N, value), 0..40)
}

fn to_coo(entries: &[(usize, usize, f64)]) -> Coo {
    let rows = entries.iter().map(|e| e.0).collect();
    let cols = entries.iter().map(|e| e.1).collect();
    let data = entries.iter().map(|e| e.2).collect();
    Coo::from_parts(N, N, rows, cols, data).unwrap()
}

proptest! {
    #[test]
    fn storage_order_does_not_matter(entries in triplets(), seed in any::<u64>()) {
        let mut shuffled = entries.clone();
        // deterministic rotation plus reversal stands in for a shuffle
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
        }
        if seed % 2 == 0 {
            shuffled.reverse();
        }
        prop_assert_eq!(to_coo(&entries).to_canonical(), to_coo(&shuffled).to_canonical());
        prop_assert_eq!(array_hash(&to_coo(&entries)), array_hash(&to_coo(&shuffled)));
    }

    #[test]
    fn every_layout_matches_dense(entries in triplets()) {
        let matrix = SparseMatrix::from(to_coo(&entries));
        let dense = matrix.to_dense();
        let hash = array_hash(&matrix);
        let layouts: Vec<SparseMatrix> = vec![
            matrix.to_csc().into(),
            matrix.to_bsr((2, 3)).unwrap().into(),
            matrix.to_dok().into(),
            matrix.to_lil().into(),
            matrix.to_dia().into(),
        ];
        for layout in layouts {
            prop_assert_eq!(&layout.to_dense(), &dense);
            prop_assert_eq!(array_hash(&layout), hash);
        }
        prop_assert!(matrix.to_canonical().has_canonical_format());
    }
}
