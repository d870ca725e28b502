// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Routines built directly on `ndarray` primitives

use ndarray::Array1;

use super::SpectralBackend;
use crate::error::NumericResult;
use crate::fft::check_rfftfreq_args;

/// Spectral routines on `ndarray` ranges
///
/// Provides no matrix exponential; selection falls back to the vendored one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl SpectralBackend for NativeBackend {
    fn backend_name(&self) -> &str {
        "native"
    }

    fn rfftfreq(&self, n: usize, d: f64) -> NumericResult<Array1<f64>> {
        check_rfftfreq_args(n, d)?;
        let bins = (n / 2 + 1) as f64;
        Ok(Array1::range(0.0, bins, 1.0) * (1.0 / (n as f64 * d)))
    }
}
