// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Startup wiring: configuration, logging and backend selection

use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use nengo_config::{
    apply_cli_overrides, apply_environment_overrides, load_config, validate_config, ConfigError,
    LoggingConfig, NengoConfig,
};
use nengo_numeric::NumericBackends;
use nengo_observability::{
    init_logging, CrateDebugFlags, FileLoggingOptions, LogFormat, LoggingGuard, LoggingOptions,
};
use tracing::info;

const CONFIG_PATH_VAR: &str = "NENGO_CONFIG_PATH";

/// Validated configuration and the providers built from it
#[derive(Debug, Clone)]
pub struct Runtime {
    pub config: NengoConfig,
    pub backends: NumericBackends,
}

/// Load, override and validate configuration
///
/// An explicit `config_path`, or one named by `NENGO_CONFIG_PATH`, must
/// exist. Without either, a missing `nengo_configuration.toml` means
/// built-in defaults (still subject to environment and CLI overrides).
pub fn load_runtime_config(
    config_path: Option<&Path>,
    cli_overrides: Option<&HashMap<String, String>>,
) -> Result<NengoConfig> {
    let searched = config_path.is_none() && env::var_os(CONFIG_PATH_VAR).is_none();
    let config = match load_config(config_path, cli_overrides) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) if searched => {
            let mut config = NengoConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_overrides {
                apply_cli_overrides(&mut config, cli);
            }
            config
        }
        Err(e) => return Err(e).context("Failed to load nengo configuration"),
    };

    validate_config(&config).context("Invalid nengo configuration")?;
    Ok(config)
}

/// Build a [`Runtime`] from configuration on disk
pub fn bootstrap(
    config_path: Option<&Path>,
    cli_overrides: Option<&HashMap<String, String>>,
) -> Result<Runtime> {
    let config = load_runtime_config(config_path, cli_overrides)?;
    let backends = NumericBackends::from_config(&config).context("Failed to select numeric backends")?;

    info!(
        target: "nengo",
        "nengo {} ready: spectral={}, expm={}, hash_sample_size={}",
        crate::version::version(),
        backends.spectral_backend_name(),
        backends.expm_backend_name(),
        backends.hash_sample_size()
    );

    Ok(Runtime { config, backends })
}

/// Logging options from the `[logging]` section
pub fn logging_options(config: &LoggingConfig) -> LoggingOptions {
    LoggingOptions {
        level: config.level.to_lowercase(),
        format: LogFormat::from_name(&config.format),
        file: config.file_logging.then(|| FileLoggingOptions {
            log_dir: config.log_dir.clone(),
            retention_days: config.retention_days,
            retention_runs: config.retention_runs,
        }),
    }
}

/// Install the global subscriber for `config`
pub fn init_runtime_logging(config: &NengoConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &logging_options(&config.logging)).context("Failed to initialize logging")
}
