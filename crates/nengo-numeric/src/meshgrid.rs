// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! N-dimensional coordinate grids

use ndarray::{ArrayD, IxDyn};

/// Coordinate arrays for the grid spanned by `axes`, with "ij" indexing
///
/// Returns one array per axis, each shaped `[axes[0].len(), axes[1].len(), ...]`.
/// Array `k` varies only along dimension `k`.
///
/// ```
/// use nengo_numeric::meshgrid_nd;
///
/// let grids = meshgrid_nd(&[vec![0, 1], vec![5, 6, 7]]);
/// assert_eq!(grids[0].shape(), &[2, 3]);
/// assert_eq!(grids[1][&[1, 2][..]], 7);
/// ```
pub fn meshgrid_nd<A: Clone, V: AsRef<[A]>>(axes: &[V]) -> Vec<ArrayD<A>> {
    let shape: Vec<usize> = axes.iter().map(|axis| axis.as_ref().len()).collect();
    axes.iter()
        .enumerate()
        .map(|(k, axis)| {
            let values = axis.as_ref();
            ArrayD::from_shape_fn(IxDyn(&shape), |index| values[index[k]].clone())
        })
        .collect()
}
