// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Matrix exponential by scaling and squaring with Pade approximants
//!
//! Follows Higham, "The scaling and squaring method for the matrix
//! exponential revisited" (2005): the Pade degree (3, 5, 7, 9 or 13) is
//! picked from the 1-norm, and only degree 13 scales the input.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use tracing::debug;

use crate::error::{NumericError, NumericResult};

const THETA_3: f64 = 1.495585217958292e-2;
const THETA_5: f64 = 2.539398330063230e-1;
const THETA_7: f64 = 9.504178996162932e-1;
const THETA_9: f64 = 2.097847961257068e0;
const THETA_13: f64 = 5.371920351148152e0;

const PADE_3: [f64; 4] = [120.0, 60.0, 12.0, 1.0];
const PADE_5: [f64; 6] = [30240.0, 15120.0, 3360.0, 420.0, 30.0, 1.0];
const PADE_7: [f64; 8] = [17297280.0, 8648640.0, 1995840.0, 277200.0, 25200.0, 1512.0, 56.0, 1.0];
const PADE_9: [f64; 10] = [
    17643225600.0,
    8821612800.0,
    2075673600.0,
    302702400.0,
    30270240.0,
    2162160.0,
    110880.0,
    3960.0,
    90.0,
    1.0,
];
const PADE_13: [f64; 14] = [
    64764752532480000.0,
    32382376266240000.0,
    7771770303897600.0,
    1187353796428800.0,
    129060195264000.0,
    10559470521600.0,
    670442572800.0,
    33522128640.0,
    1323241920.0,
    40840800.0,
    960960.0,
    16380.0,
    182.0,
    1.0,
];

/// Matrix exponential of a square matrix
///
/// # Errors
/// - Validation error if `a` is not square
/// - Value error if `a` holds NaN or infinity, or the Pade denominator is singular
pub fn expm<S: Data<Elem = f64>>(a: &ArrayBase<S, Ix2>) -> NumericResult<Array2<f64>> {
    let (nrows, ncols) = a.dim();
    if nrows != ncols {
        return Err(NumericError::validation(
            "a",
            format!("expected a square matrix, got shape ({}, {})", nrows, ncols),
        ));
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(NumericError::value("array must not contain infs or NaNs"));
    }
    if nrows == 0 {
        return Ok(Array2::zeros((0, 0)));
    }

    let a = a.to_owned();
    let norm = one_norm(&a);
    let identity = Array2::<f64>::eye(nrows);
    let a2 = a.dot(&a);

    let low_degree: [(f64, &[f64]); 4] = [
        (THETA_3, &PADE_3[..]),
        (THETA_5, &PADE_5[..]),
        (THETA_7, &PADE_7[..]),
        (THETA_9, &PADE_9[..]),
    ];
    for (theta, coefficients) in low_degree {
        if norm <= theta {
            debug!(
                target: "nengo-numeric",
                "expm: {}x{} matrix, 1-norm {:.3e}, pade degree {}",
                nrows,
                ncols,
                norm,
                coefficients.len() - 1
            );
            let (u, v) = pade_low(&a, &a2, &identity, coefficients);
            return solve(&v - &u, &v + &u);
        }
    }

    let squarings = (norm / THETA_13).log2().ceil().max(0.0) as i32;
    debug!(
        target: "nengo-numeric",
        "expm: {}x{} matrix, 1-norm {:.3e}, pade degree 13, {} squarings",
        nrows,
        ncols,
        norm,
        squarings
    );

    let scale = 2f64.powi(-squarings);
    let a = a * scale;
    let a2 = a2 * (scale * scale);
    let (u, v) = pade_13(&a, &a2, &identity);
    let mut result = solve(&v - &u, &v + &u)?;
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    Ok(result)
}

/// Largest absolute column sum
fn one_norm(a: &Array2<f64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Odd part `U` and even part `V` of a Pade approximant of degree 3 to 9
fn pade_low(
    a: &Array2<f64>,
    a2: &Array2<f64>,
    identity: &Array2<f64>,
    b: &[f64],
) -> (Array2<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut power = identity.clone();
    let mut odd = Array2::<f64>::zeros((n, n));
    let mut even = Array2::<f64>::zeros((n, n));
    for pair in b.chunks(2) {
        even.scaled_add(pair[0], &power);
        odd.scaled_add(pair[1], &power);
        power = power.dot(a2);
    }
    (a.dot(&odd), even)
}

fn pade_13(a: &Array2<f64>, a2: &Array2<f64>, identity: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let b = &PADE_13;
    let a4 = a2.dot(a2);
    let a6 = a4.dot(a2);

    let high_odd = &a6 * b[13] + &a4 * b[11] + a2 * b[9];
    let low_odd = &a6 * b[7] + &a4 * b[5] + a2 * b[3] + identity * b[1];
    let u = a.dot(&(a6.dot(&high_odd) + low_odd));

    let high_even = &a6 * b[12] + &a4 * b[10] + a2 * b[8];
    let low_even = &a6 * b[6] + &a4 * b[4] + a2 * b[2] + identity * b[0];
    let v = a6.dot(&high_even) + low_even;

    (u, v)
}

/// Solve `p @ x = q` by LU factorization with partial pivoting
fn solve(mut p: Array2<f64>, mut q: Array2<f64>) -> NumericResult<Array2<f64>> {
    let n = p.nrows();

    for k in 0..n {
        let mut pivot_row = k;
        for i in k + 1..n {
            if p[(i, k)].abs() > p[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        let pivot = p[(pivot_row, k)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(NumericError::value("matrix is singular"));
        }
        if pivot_row != k {
            for j in 0..n {
                p.swap((k, j), (pivot_row, j));
                q.swap((k, j), (pivot_row, j));
            }
        }

        for i in k + 1..n {
            let factor = p[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            p[(i, k)] = 0.0;
            for j in k + 1..n {
                p[(i, j)] -= factor * p[(k, j)];
            }
            for j in 0..n {
                q[(i, j)] -= factor * q[(k, j)];
            }
        }
    }

    // back substitution, one right-hand column at a time
    for col in 0..n {
        for i in (0..n).rev() {
            let mut acc = q[(i, col)];
            for j in i + 1..n {
                acc -= p[(i, j)] * q[(j, col)];
            }
            q[(i, col)] = acc / p[(i, i)];
        }
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ndarray::{array, Array1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn allclose(actual: &Array2<f64>, expected: &Array2<f64>) -> bool {
        actual.shape() == expected.shape()
            && actual
                .iter()
                .zip(expected.iter())
                .all(|(x, y)| (x - y).abs() <= 1e-8 + 1e-5 * y.abs())
    }

    /// Scaled Taylor series, slow but simple
    fn taylor_expm(a: &Array2<f64>) -> Array2<f64> {
        let mut squarings = 0;
        let mut scaled = a.clone();
        while one_norm(&scaled) > 0.5 {
            scaled = scaled * 0.5;
            squarings += 1;
        }
        let n = a.nrows();
        let mut result = Array2::<f64>::eye(n);
        let mut term = Array2::<f64>::eye(n);
        for k in 1..30 {
            term = term.dot(&scaled) / k as f64;
            result = result + &term;
        }
        for _ in 0..squarings {
            result = result.dot(&result);
        }
        result
    }

    fn random_matrix(rng: &mut StdRng, n: usize, offset: f64) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |_| offset + rng.gen_range(-2.0f64..2.0))
    }

    #[test]
    fn test_identity_and_zero() {
        let e = std::f64::consts::E;
        let result = expm(&Array2::<f64>::eye(3)).unwrap();
        assert!(allclose(&result, &(Array2::<f64>::eye(3) * e)));

        let result = expm(&Array2::<f64>::zeros((4, 4))).unwrap();
        assert_eq!(result, Array2::<f64>::eye(4));
    }

    #[test]
    fn test_diagonal() {
        let diagonal = Array1::from(vec![1.0, -2.0, 0.5, 8.0]);
        let result = expm(&Array2::from_diag(&diagonal)).unwrap();
        assert!(allclose(&result, &Array2::from_diag(&diagonal.mapv(f64::exp))));
    }

    #[test]
    fn test_nilpotent() {
        let result = expm(&array![[0.0, 1.0], [0.0, 0.0]]).unwrap();
        assert!(allclose(&result, &array![[1.0, 1.0], [0.0, 1.0]]));
    }

    #[test]
    fn test_every_degree_matches_taylor() {
        let mut rng = StdRng::seed_from_u64(9);
        // 1-norms chosen to land in each degree bracket
        for target in [0.01, 0.2, 0.9, 2.0, 5.0, 40.0] {
            let a = random_matrix(&mut rng, 6, 0.0);
            let a = &a * (target / one_norm(&a));
            assert!(allclose(&expm(&a).unwrap(), &taylor_expm(&a)), "norm {}", target);
        }
    }

    #[test]
    fn test_random_matrices() {
        let mut rng = StdRng::seed_from_u64(1);
        for offset in [0.0, -10.0] {
            let a = random_matrix(&mut rng, 10, offset);
            assert!(allclose(&expm(&a).unwrap(), &taylor_expm(&a)));
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = random_matrix(&mut rng, 5, 0.0);
        let product = expm(&a).unwrap().dot(&expm(&(-&a)).unwrap());
        let error = (&product - &Array2::<f64>::eye(5)).mapv(f64::abs).fold(0.0, |m: f64, &v| m.max(v));
        assert!(error < 1e-9, "max error {}", error);
    }

    #[test]
    fn test_view_input() {
        let a = array![[0.0, 1.0, 9.0], [-1.0, 0.0, 9.0]];
        let square = a.slice(ndarray::s![.., ..2]);
        let result = expm(&square).unwrap();
        let (s, c) = 1f64.sin_cos();
        assert!(allclose(&result, &array![[c, s], [-s, c]]));
    }

    #[test]
    fn test_errors() {
        let err = expm(&Array2::<f64>::zeros((2, 3))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = expm(&array![[1.0, f64::NAN], [0.0, 1.0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        assert_eq!(expm(&Array2::<f64>::zeros((0, 0))).unwrap().dim(), (0, 0));
    }

    #[test]
    fn test_solve_singular() {
        let err = solve(array![[1.0, 2.0], [2.0, 4.0]], Array2::eye(2)).unwrap_err();
        assert!(err.to_string().contains("singular"));
    }

    #[test]
    fn test_solve_pivots() {
        let x = solve(array![[0.0, 1.0], [2.0, 0.0]], array![[1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert!(allclose(&x, &array![[0.0, 0.5], [1.0, 0.0]]));
    }
}
