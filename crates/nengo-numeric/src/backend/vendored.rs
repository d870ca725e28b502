// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-crate implementations, always available

use ndarray::{Array1, Array2, ArrayView2};

use super::{MatrixExpBackend, SpectralBackend};
use crate::error::NumericResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct VendoredBackend;

impl SpectralBackend for VendoredBackend {
    fn backend_name(&self) -> &str {
        "vendored"
    }

    fn rfftfreq(&self, n: usize, d: f64) -> NumericResult<Array1<f64>> {
        crate::fft::rfftfreq(n, d)
    }
}

impl MatrixExpBackend for VendoredBackend {
    fn backend_name(&self) -> &str {
        "vendored"
    }

    fn expm(&self, a: ArrayView2<'_, f64>) -> NumericResult<Array2<f64>> {
        crate::expm::expm(&a)
    }
}
