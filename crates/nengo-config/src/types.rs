// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `nengo_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend names accepted by `numeric.spectral_backend` and `numeric.expm_backend`
pub const BACKEND_NAMES: &[&str] = &["auto", "native", "vendored"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NengoConfig {
    pub numeric: NumericConfig,
    pub hashing: HashingConfig,
    pub logging: LoggingConfig,
}

/// Numeric backend selection
///
/// Each value is one of [`BACKEND_NAMES`]. `auto` prefers the native
/// implementation when one exists and falls back to the vendored one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NumericConfig {
    pub spectral_backend: String,
    pub expm_backend: String,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            spectral_backend: "auto".to_string(),
            expm_backend: "auto".to_string(),
        }
    }
}

/// Structural hashing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Hash at most this many sampled entries per array (0 = hash everything)
    pub sample_size: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self { sample_size: 0 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,
    /// Console format ("text" or "json")
    pub format: String,
    /// Write per-run log files (needs the `file-logging` feature in nengo-observability)
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
