// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Numeric Backend Selection
//!
//! Some routines have more than one provider: a native one built on the
//! array library and a vendored one implemented in this crate. Providers
//! are chosen once, when [`NumericBackends`] is built, and handed to
//! callers explicitly. Nothing is probed or patched at call time.
//!
//! Callers may inject their own providers (for example a LAPACK-backed
//! matrix exponential) through [`NumericBackends::with_backends`].

mod native;
mod vendored;

pub use native::NativeBackend;
pub use vendored::VendoredBackend;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix2};
use nengo_config::NengoConfig;
use tracing::{info, warn};

use crate::error::{NumericError, NumericResult};
use crate::hash::{array_hash, array_hash_sampled, ArrayHash};

/// Provider of `rfftfreq`
pub trait SpectralBackend: Send + Sync {
    /// Backend name for logging/debugging
    fn backend_name(&self) -> &str;

    /// Sample frequencies `[0, 1, ..., n / 2] / (n * d)`
    fn rfftfreq(&self, n: usize, d: f64) -> NumericResult<Array1<f64>>;
}

/// Provider of the matrix exponential
pub trait MatrixExpBackend: Send + Sync {
    /// Backend name for logging/debugging
    fn backend_name(&self) -> &str;

    fn expm(&self, a: ArrayView2<'_, f64>) -> NumericResult<Array2<f64>>;
}

/// Requested provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Native where available, vendored otherwise
    #[default]
    Auto,
    Native,
    Vendored,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Auto => write!(f, "auto"),
            BackendKind::Native => write!(f, "native"),
            BackendKind::Vendored => write!(f, "vendored"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = NumericError;

    fn from_str(s: &str) -> NumericResult<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(BackendKind::Auto),
            "native" => Ok(BackendKind::Native),
            "vendored" => Ok(BackendKind::Vendored),
            _ => Err(NumericError::validation(
                "backend",
                format!("unknown backend '{}' (expected auto, native or vendored)", s),
            )),
        }
    }
}

/// Routine with selectable providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Rfftfreq,
    Expm,
}

impl Capability {
    /// Whether [`NativeBackend`] provides this routine
    pub fn has_native(&self) -> bool {
        match self {
            Capability::Rfftfreq => true,
            Capability::Expm => false,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Rfftfreq => write!(f, "rfftfreq"),
            Capability::Expm => write!(f, "expm"),
        }
    }
}

/// Backend selection decision with rationale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDecision {
    pub capability: Capability,
    /// Resolved kind, never `Auto`
    pub backend_kind: BackendKind,
    pub reason: String,
}

/// Resolve `requested` for `capability`
///
/// Selection priority:
/// 1. Honor an explicit request when the provider exists
/// 2. Fall back to vendored when native is requested but missing
/// 3. `Auto` prefers native, then vendored
pub fn select_backend(capability: Capability, requested: BackendKind) -> BackendDecision {
    let (backend_kind, reason) = match requested {
        BackendKind::Vendored => (BackendKind::Vendored, "Forced vendored via configuration".to_string()),
        BackendKind::Native if capability.has_native() => {
            (BackendKind::Native, "Forced native via configuration".to_string())
        }
        BackendKind::Native => {
            warn!(
                target: "nengo-numeric",
                "Native {} requested but not available, falling back to vendored",
                capability
            );
            (
                BackendKind::Vendored,
                format!("native {} not available, falling back to vendored", capability),
            )
        }
        BackendKind::Auto if capability.has_native() => {
            (BackendKind::Native, format!("native {} available", capability))
        }
        BackendKind::Auto => (
            BackendKind::Vendored,
            format!("no native {}, using vendored", capability),
        ),
    };

    info!(
        target: "nengo-numeric",
        "Selected {} backend for {}: {}",
        backend_kind,
        capability,
        reason
    );

    BackendDecision {
        capability,
        backend_kind,
        reason,
    }
}

/// Providers chosen at startup, shared by every caller
///
/// Cheap to clone; safe to share across threads.
#[derive(Clone)]
pub struct NumericBackends {
    spectral: Arc<dyn SpectralBackend>,
    expm: Arc<dyn MatrixExpBackend>,
    /// 0 hashes every entry
    hash_sample_size: usize,
}

impl NumericBackends {
    /// Providers for the requested kinds, falling back where needed
    pub fn from_kinds(spectral: BackendKind, expm: BackendKind) -> Self {
        let spectral: Arc<dyn SpectralBackend> =
            match select_backend(Capability::Rfftfreq, spectral).backend_kind {
                BackendKind::Native => Arc::new(NativeBackend),
                _ => Arc::new(VendoredBackend),
            };
        // records the fallback; only the vendored provider implements expm
        select_backend(Capability::Expm, expm);
        let expm: Arc<dyn MatrixExpBackend> = Arc::new(VendoredBackend);

        NumericBackends {
            spectral,
            expm,
            hash_sample_size: 0,
        }
    }

    /// Providers named by the `[numeric]` and `[hashing]` sections
    ///
    /// # Errors
    /// Validation error on an unknown backend name.
    pub fn from_config(config: &NengoConfig) -> NumericResult<Self> {
        let spectral = config.numeric.spectral_backend.parse::<BackendKind>()?;
        let expm = config.numeric.expm_backend.parse::<BackendKind>()?;
        Ok(Self::from_kinds(spectral, expm).with_hash_sample_size(config.hashing.sample_size))
    }

    /// Caller-supplied providers
    pub fn with_backends(spectral: Arc<dyn SpectralBackend>, expm: Arc<dyn MatrixExpBackend>) -> Self {
        info!(
            target: "nengo-numeric",
            "Using injected backends: spectral={}, expm={}",
            spectral.backend_name(),
            expm.backend_name()
        );
        NumericBackends {
            spectral,
            expm,
            hash_sample_size: 0,
        }
    }

    /// Hash at most `sample_size` entries per value (0 hashes everything)
    pub fn with_hash_sample_size(mut self, sample_size: usize) -> Self {
        self.hash_sample_size = sample_size;
        self
    }

    pub fn spectral_backend_name(&self) -> &str {
        self.spectral.backend_name()
    }

    pub fn expm_backend_name(&self) -> &str {
        self.expm.backend_name()
    }

    pub fn hash_sample_size(&self) -> usize {
        self.hash_sample_size
    }

    pub fn rfftfreq(&self, n: usize, d: f64) -> NumericResult<Array1<f64>> {
        self.spectral.rfftfreq(n, d)
    }

    pub fn expm<S: Data<Elem = f64>>(&self, a: &ArrayBase<S, Ix2>) -> NumericResult<Array2<f64>> {
        self.expm.expm(a.view())
    }

    /// Structural hash, sampled when a sample size is configured
    ///
    /// With a non-zero sample size and a value holding more entries than
    /// that, only the sampled positions are hashed: values differing only
    /// at unsampled positions collide. Call [`array_hash`] directly where
    /// every entry must count.
    pub fn array_hash<T: ArrayHash + ?Sized>(&self, value: &T) -> u64 {
        match self.hash_sample_size {
            0 => array_hash(value),
            n => array_hash_sampled(value, n),
        }
    }
}

impl Default for NumericBackends {
    fn default() -> Self {
        Self::from_kinds(BackendKind::Auto, BackendKind::Auto)
    }
}

impl fmt::Debug for NumericBackends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericBackends")
            .field("spectral", &self.spectral.backend_name())
            .field("expm", &self.expm.backend_name())
            .field("hash_sample_size", &self.hash_sample_size)
            .finish()
    }
}
