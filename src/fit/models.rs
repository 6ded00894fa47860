//! Normal-equation fits for the three model families.

use crate::error::{NumkitError, Result};
use crate::linalg::{solve, Matrix};

use super::sums::PowerSums;
use super::{sum_squared_residuals, FitKind, FitResult};

/// Mean of `x` and the samples shifted by it.
///
/// The normal equations are formed in `t = x - mean`; the solved
/// coefficients are expanded back into powers of `x`.
fn centre(x: &[f64]) -> (f64, Vec<f64>) {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    (mean, x.iter().map(|v| v - mean).collect())
}

/// `G(x) = a0 + a1 x`.
pub(crate) fn linear(x: &[f64], y: &[f64]) -> Result<FitResult> {
    let (m, t) = centre(x);
    let s = PowerSums::new(&t, y);
    let a = Matrix::from_rows(&[[s.x_pow[0], s.x_pow[1]], [s.x_pow[1], s.x_pow[2]]])?;
    let c = solve(&a, &[s.xy_pow[0], s.xy_pow[1]])?;

    let fitted: Vec<f64> = t.iter().map(|&ti| c[0] + c[1] * ti).collect();
    let coefficients = vec![c[0] - c[1] * m, c[1]];
    Ok(FitResult::new(FitKind::Linear, coefficients, fitted, y))
}

/// `G(x) = a0 + a1 x + a2 x^2`.
pub(crate) fn quadratic(x: &[f64], y: &[f64]) -> Result<FitResult> {
    if x.len() < 3 {
        return Err(NumkitError::insufficient_points("Quadratic fit", 3, x.len()));
    }
    let (m, t) = centre(x);
    let s = PowerSums::new(&t, y);
    let p = &s.x_pow;
    let a = Matrix::from_rows(&[
        [p[0], p[1], p[2]],
        [p[1], p[2], p[3]],
        [p[2], p[3], p[4]],
    ])?;
    let c = solve(&a, &s.xy_pow)?;

    let fitted: Vec<f64> = t
        .iter()
        .map(|&ti| c[0] + c[1] * ti + c[2] * ti * ti)
        .collect();
    // Expand c0 + c1 (x - m) + c2 (x - m)^2 back into powers of x
    let coefficients = vec![
        c[0] - c[1] * m + c[2] * m * m,
        c[1] - 2.0 * c[2] * m,
        c[2],
    ];
    Ok(FitResult::new(FitKind::Quadratic, coefficients, fitted, y))
}

/// `G(x) = a e^(b x)`, fitted as a line through `(x, ln y)`.
///
/// Coefficients stay in log space (`[ln a, b]`); fitted values and the
/// residual error are in the original space.
pub(crate) fn exponential(x: &[f64], y: &[f64]) -> Result<FitResult> {
    if let Some((index, &value)) = y.iter().enumerate().find(|(_, v)| **v <= 0.0 || v.is_nan()) {
        return Err(NumkitError::NonPositiveValues { index, value });
    }
    let ln_y: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let line = linear(x, &ln_y)?;

    let fitted: Vec<f64> = line.fitted.iter().map(|v| v.exp()).collect();
    Ok(FitResult {
        kind: FitKind::Exponential,
        error: sum_squared_residuals(y, &fitted),
        coefficients: line.coefficients,
        fitted,
    })
}
