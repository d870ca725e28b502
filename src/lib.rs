// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nengo - Numeric Utilities
//!
//! The array layer underneath the nengo neural simulator. This crate
//! re-exports the workspace members and adds startup wiring.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! nengo = "3.2"
//! ```
//!
//! ```rust
//! use nengo::prelude::*;
//!
//! let x = array(vec![1.0, 2.0, 3.0], ArrayOptions::dims(2))?;
//! assert_eq!(x.shape(), &[3, 1]);
//!
//! let key = array_hash(&x);
//! assert_eq!(key, array_hash(&x.into_inner()));
//! # Ok::<(), nengo::numeric::NumericError>(())
//! ```
//!
//! ## Startup
//!
//! ```rust,no_run
//! use nengo::{bootstrap, init_runtime_logging, observability::parse_debug_flags};
//!
//! let runtime = bootstrap(None, None)?;
//! let _guard = init_runtime_logging(&runtime.config, &parse_debug_flags())?;
//!
//! let freqs = runtime.backends.rfftfreq(16, 0.001)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Crates
//!
//! - **nengo-numeric**: shapes, hashing, sparse layouts, expm, meshgrid, rfftfreq
//! - **nengo-config**: TOML configuration with environment and CLI overrides
//! - **nengo-observability**: logging setup and per-crate debug flags
//!
//! ## Feature Flags
//!
//! - **`file-logging`**: per-run JSON log files
//!
//! ## License
//!
//! Apache-2.0

pub mod bootstrap;
pub mod version;

pub use nengo_config as config;
pub use nengo_numeric as numeric;
pub use nengo_observability as observability;

pub use bootstrap::{bootstrap, init_runtime_logging, load_runtime_config, logging_options, Runtime};
pub use version::{version, VersionInfo, NAME};

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::numeric::{
        array, array_hash, array_hash_sampled, as_shape, broadcast_shape, expm, meshgrid_nd, rfftfreq,
        ArrayHash, ArrayOptions, ErrorKind, NdBuffer, NumericBackends, NumericError, NumericResult,
        SparseMatrix,
    };
    pub use crate::Runtime;
}
