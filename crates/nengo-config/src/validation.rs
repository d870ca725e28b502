// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that every value is one the numeric and observability layers can act on.

use crate::{ConfigError, ConfigResult, NengoConfig, BACKEND_NAMES};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    UnknownBackend { field: String, value: String },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend { field, value } => write!(
                f,
                "{} = '{}' is not a known backend (expected one of: {})",
                field,
                value,
                BACKEND_NAMES.join(", ")
            ),
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NengoConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_backends(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_backends(config: &NengoConfig, errors: &mut Vec<ConfigValidationError>) {
    let fields = [
        ("numeric.spectral_backend", &config.numeric.spectral_backend),
        ("numeric.expm_backend", &config.numeric.expm_backend),
    ];
    for (field, value) in fields {
        if !BACKEND_NAMES.contains(&value.as_str()) {
            errors.push(ConfigValidationError::UnknownBackend {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }
}

fn validate_logging(config: &NengoConfig, errors: &mut Vec<ConfigValidationError>) {
    let logging = &config.logging;

    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: "must be 'text' or 'json'".to_string(),
        });
    }

    if logging.file_logging {
        if logging.log_dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: "logging.log_dir".to_string(),
            });
        }
        if logging.retention_runs == 0 {
            errors.push(ConfigValidationError::InvalidValue {
                field: "logging.retention_runs".to_string(),
                reason: "must keep at least one run".to_string(),
            });
        }
    }
}
