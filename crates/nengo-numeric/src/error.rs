// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for numeric operations
//!
//! Two kinds are distinguished so callers can react differently:
//! value errors (malformed arguments, writes to read-only buffers) and
//! validation errors (an input that is well-formed but incompatible with
//! the requested shape or rank).

/// Coarse classification of a [`NumericError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Value,
    Validation,
}

/// Errors returned by the numeric utilities
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// Malformed or unconvertible argument, or mutation of a read-only buffer
    #[error("{0}")]
    Value(String),

    /// Argument `attr` is incompatible with the input
    #[error("{attr}: {msg}")]
    Validation { attr: String, msg: String },
}

impl NumericError {
    pub fn value(msg: impl Into<String>) -> Self {
        NumericError::Value(msg.into())
    }

    pub fn validation(attr: impl Into<String>, msg: impl Into<String>) -> Self {
        NumericError::Validation {
            attr: attr.into(),
            msg: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::Value(_) => ErrorKind::Value,
            NumericError::Validation { .. } => ErrorKind::Validation,
        }
    }
}

pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinguishable() {
        assert_eq!(NumericError::value("bad").kind(), ErrorKind::Value);
        assert_eq!(NumericError::validation("dims", "bad").kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_display() {
        assert_eq!(NumericError::value("x is read-only").to_string(), "x is read-only");
        assert_eq!(
            NumericError::validation("dims", "Input cannot be cast to array").to_string(),
            "dims: Input cannot be cast to array"
        );
    }
}
