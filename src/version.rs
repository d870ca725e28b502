// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Version descriptor
//!
//! Semantic versioning, rendered per PEP 440: `.devN` is appended unless
//! the build is a tagged release.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const NAME: &str = "nengo";

/// `(major, minor, patch)`
pub const VERSION_INFO: (u32, u32, u32) = (3, 2, 0);

/// Development release number; `None` for tagged releases
pub const DEV: Option<u32> = Some(0);

/// Structured version of this build
pub const CURRENT: VersionInfo = VersionInfo {
    major: VERSION_INFO.0,
    minor: VERSION_INFO.1,
    patch: VERSION_INFO.2,
    dev: DEV,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub dev: Option<u32>,
}

impl VersionInfo {
    pub fn is_release(&self) -> bool {
        self.dev.is_none()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        Ok(())
    }
}

/// Version string, e.g. `3.2.0.dev0`
pub fn version() -> String {
    CURRENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert_eq!(version(), "3.2.0.dev0");
        assert_eq!(NAME, "nengo");
        assert!(!CURRENT.is_release());
    }

    #[test]
    fn test_release_has_no_dev_suffix() {
        let release = VersionInfo { dev: None, ..CURRENT };
        assert_eq!(release.to_string(), "3.2.0");
        assert!(release.is_release());
    }
}
