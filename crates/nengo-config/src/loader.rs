// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later tiers win:
//! 1. TOML file (base values, missing keys fall back to defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, NengoConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "nengo_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `NENGO_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NENGO_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by NENGO_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet NENGO_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file and apply overrides
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not valid TOML.
/// Validation is a separate step, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NengoConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NengoConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NENGO_SPECTRAL_BACKEND` -> `numeric.spectral_backend`
/// - `NENGO_EXPM_BACKEND` -> `numeric.expm_backend`
/// - `NENGO_HASH_SAMPLE_SIZE` -> `hashing.sample_size`
/// - `NENGO_LOG_LEVEL` -> `logging.level`
/// - `NENGO_LOG_DIR` -> `logging.log_dir`
pub fn apply_environment_overrides(config: &mut NengoConfig) {
    if let Ok(value) = env::var("NENGO_SPECTRAL_BACKEND") {
        config.numeric.spectral_backend = value.to_lowercase();
    }
    if let Ok(value) = env::var("NENGO_EXPM_BACKEND") {
        config.numeric.expm_backend = value.to_lowercase();
    }
    if let Ok(value) = env::var("NENGO_HASH_SAMPLE_SIZE") {
        if let Ok(size) = value.parse::<usize>() {
            config.hashing.sample_size = size;
        }
    }
    if let Ok(value) = env::var("NENGO_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("NENGO_LOG_DIR") {
        config.logging.log_dir = PathBuf::from(value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments, e.g. `{"spectral_backend": "vendored", "log_level": "debug"}`
pub fn apply_cli_overrides(config: &mut NengoConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("spectral_backend") {
        config.numeric.spectral_backend = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("expm_backend") {
        config.numeric.expm_backend = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("hash_sample_size") {
        if let Ok(size) = value.parse::<usize>() {
            config.hashing.sample_size = size;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("file_logging") {
        config.logging.file_logging =
            value.to_lowercase() == "true" || value == "1" || value.to_lowercase() == "yes";
    }
}
