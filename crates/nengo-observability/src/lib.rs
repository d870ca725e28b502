// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # nengo-observability
//!
//! Logging setup shared by the nengo crates, with per-crate debug flags.
//!
//! ## Features
//! - `file-logging`: per-run JSON log files with retention cleanup

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags
///
/// These are also the `tracing` targets the crates log under.
pub const KNOWN_CRATES: &[&str] = &["nengo", "nengo-numeric", "nengo-config"];
