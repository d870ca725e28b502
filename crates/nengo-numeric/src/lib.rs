// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nengo Numeric Utilities
//!
//! Array helpers shared by the simulator:
//! - **Shapes**: [`as_shape`], [`broadcast_shape`] and [`array`] with rank control
//!   and read-only buffers
//! - **Structural hashing**: [`array_hash`] for dense arrays and for sparse
//!   matrices in any of seven layouts
//! - **Linear algebra**: [`expm`] (Pade scaling and squaring)
//! - **Grids and spectra**: [`meshgrid_nd`] and [`rfftfreq`]
//! - **Backend selection**: [`NumericBackends`] picks providers once at startup
//!
//! ## Usage
//!
//! ```rust
//! use nengo_numeric::{array_hash, as_shape, Csr, SparseMatrix};
//!
//! assert_eq!(as_shape(vec![3, 2]).unwrap(), vec![3, 2]);
//!
//! let csr = Csr::from_parts(2, 2, vec![0, 1, 2], vec![1, 0], vec![1.0, 2.0]).unwrap();
//! let matrix = SparseMatrix::from(csr);
//! assert_eq!(array_hash(&matrix), array_hash(&matrix.to_coo()));
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod array;
pub mod backend;
pub mod element;
pub mod error;
pub mod expm;
pub mod fft;
pub mod hash;
pub mod meshgrid;
pub mod shape;
pub mod sparse;

pub use array::{array, ArrayOptions, IntoArrayLike, NdBuffer};
pub use backend::{
    select_backend, BackendDecision, BackendKind, Capability, MatrixExpBackend, NativeBackend,
    NumericBackends, SpectralBackend, VendoredBackend,
};
pub use element::Element;
pub use error::{ErrorKind, NumericError, NumericResult};
pub use expm::expm;
pub use fft::rfftfreq;
pub use hash::{array_hash, array_hash_sampled, ArrayHash};
pub use meshgrid::meshgrid_nd;
pub use shape::{as_shape, as_shape_min, broadcast_shape, Shape, ShapeValue};
pub use sparse::{Bsr, Coo, Csc, Csr, Dia, Dok, Entry, Lil, SparseFormat, SparseMatrix};
