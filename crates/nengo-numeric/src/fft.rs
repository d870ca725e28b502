// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sample frequencies for real-input discrete Fourier transforms

use ndarray::Array1;

use crate::error::{NumericError, NumericResult};

/// Check `rfftfreq` arguments
pub(crate) fn check_rfftfreq_args(n: usize, d: f64) -> NumericResult<()> {
    if n == 0 {
        return Err(NumericError::value("n must be a positive integer"));
    }
    if d == 0.0 || !d.is_finite() {
        return Err(NumericError::value(format!(
            "sample spacing d must be finite and non-zero, got {}",
            d
        )));
    }
    Ok(())
}

/// Frequencies `[0, 1, ..., n / 2] / (n * d)` for window length `n` and spacing `d`
///
/// This is the explicit-loop routine; [`crate::NumericBackends`] may route
/// to a faster provider.
///
/// ```
/// use nengo_numeric::rfftfreq;
///
/// let freqs = rfftfreq(8, 0.1).unwrap();
/// assert_eq!(freqs.len(), 5);
/// assert!((freqs[4] - 5.0).abs() < 1e-12);
/// ```
pub fn rfftfreq(n: usize, d: f64) -> NumericResult<Array1<f64>> {
    check_rfftfreq_args(n, d)?;
    let span = n as f64 * d;
    Ok((0..=n / 2).map(|k| k as f64 / span).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_even_and_odd_lengths() {
        assert_eq!(rfftfreq(4, 1.0).unwrap().to_vec(), vec![0.0, 0.25, 0.5]);
        assert_eq!(rfftfreq(3, 1.0).unwrap().to_vec(), vec![0.0, 1.0 / 3.0]);
        assert_eq!(rfftfreq(1, 2.0).unwrap().to_vec(), vec![0.0]);
    }

    #[test]
    fn test_spacing() {
        let freqs = rfftfreq(9, 3.4).unwrap();
        assert_eq!(freqs.len(), 5);
        assert!((freqs[4] - 4.0 / (9.0 * 3.4)).abs() < 1e-15);
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(rfftfreq(0, 1.0).unwrap_err().kind(), ErrorKind::Value);
        assert!(rfftfreq(4, 0.0).is_err());
        assert!(rfftfreq(4, f64::NAN).is_err());
        assert!(rfftfreq(4, f64::INFINITY).is_err());
    }
}
