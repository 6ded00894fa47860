//! Least-squares curve fitting.
//!
//! Each model reduces to a small normal-equation system built from power
//! sums of the samples and solved with [`crate::linalg::solve`]:
//!
//! | Model | `G(x)` | Normal matrix |
//! |-------|--------|---------------|
//! | Linear | `a0 + a1 x` | `[[N, Sx], [Sx, Sx2]]` |
//! | Quadratic | `a0 + a1 x + a2 x^2` | `[[N, Sx, Sx2], [Sx, Sx2, Sx3], [Sx2, Sx3, Sx4]]` |
//! | Exponential | `a e^(b x)` | linear fit on `(x, ln y)` |
//!
//! The sums are taken over `x - mean(x)`, so data far from the origin (years,
//! timestamps) stays solvable; coefficients are still reported for `x`.
//!
//! The quality metric for every model is the sum of squared residuals
//! `sum (y - G(x))^2`, always measured against the original observations.
//! For the exponential model the coefficients are reported in log space
//! (`[ln a, b]`) while the fitted curve and its error are in original space.

mod batch;
mod models;
mod sums;

use std::fmt;
use std::str::FromStr;

pub use batch::{fit_all, FitBatch};

use crate::error::{NumkitError, Result};
use crate::series::check_lengths;

/// Model family for a least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FitKind {
    /// Straight line
    Linear,
    /// Parabola
    Quadratic,
    /// Exponential via log linearization
    Exponential,
}

impl FitKind {
    /// All model families in evaluation order.
    pub const ALL: [FitKind; 3] = [FitKind::Linear, FitKind::Quadratic, FitKind::Exponential];

    /// Human readable model name.
    pub fn name(&self) -> &'static str {
        match self {
            FitKind::Linear => "Linear",
            FitKind::Quadratic => "Quadratic",
            FitKind::Exponential => "Exponential",
        }
    }

    /// Minimum number of samples the model needs.
    pub fn min_points(&self) -> usize {
        match self {
            FitKind::Quadratic => 3,
            FitKind::Linear | FitKind::Exponential => 2,
        }
    }
}

impl fmt::Display for FitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitKind {
    type Err = NumkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "line" => Ok(FitKind::Linear),
            "quadratic" | "parabola" => Ok(FitKind::Quadratic),
            "exponential" | "exp" => Ok(FitKind::Exponential),
            _ => Err(NumkitError::invalid_input(format!(
                "unknown fit kind '{}' (expected linear, quadratic or exponential)",
                s
            ))),
        }
    }
}

/// A fitted model.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Model family
    pub kind: FitKind,
    /// `[a0, a1]`, `[a0, a1, a2]` or `[ln a, b]` depending on `kind`
    pub coefficients: Vec<f64>,
    /// Model values at the input `x`
    pub fitted: Vec<f64>,
    /// Sum of squared residuals against the observations
    pub error: f64,
}

impl FitResult {
    fn new(kind: FitKind, coefficients: Vec<f64>, fitted: Vec<f64>, observed: &[f64]) -> Self {
        let error = sum_squared_residuals(observed, &fitted);
        Self {
            kind,
            coefficients,
            fitted,
            error,
        }
    }

    /// Evaluate the fitted model at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let c = &self.coefficients;
        match self.kind {
            FitKind::Linear => c[0] + c[1] * x,
            FitKind::Quadratic => c[0] + c[1] * x + c[2] * x * x,
            FitKind::Exponential => (c[0] + c[1] * x).exp(),
        }
    }

    /// Equation of the fitted curve with four decimals.
    pub fn equation(&self) -> String {
        let c = &self.coefficients;
        match self.kind {
            FitKind::Linear => format!("G(x) = {:.4} + {:.4}*x", c[0], c[1]),
            FitKind::Quadratic => {
                format!("G(x) = {:.4} + {:.4}*x + {:.4}*x^2", c[0], c[1], c[2])
            }
            FitKind::Exponential => format!("G(x) = {:.4} * e^({:.4}*x)", c[0].exp(), c[1]),
        }
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.equation())
    }
}

/// Fit one model to the samples.
///
/// # Errors
///
/// - [`NumkitError::DimensionMismatch`] if `x` and `y` differ in length
/// - [`NumkitError::InsufficientPoints`] below the model's minimum
/// - [`NumkitError::NonPositiveValues`] for an exponential fit with `y <= 0`
/// - [`NumkitError::SingularMatrix`] when the normal equations are degenerate
///   (e.g. every `x` identical)
pub fn fit(kind: FitKind, x: &[f64], y: &[f64]) -> Result<FitResult> {
    check_lengths(x, y)?;
    if x.len() < 2 {
        return Err(NumkitError::insufficient_points(
            "Least-squares fit",
            2,
            x.len(),
        ));
    }

    let result = match kind {
        FitKind::Linear => models::linear(x, y),
        FitKind::Quadratic => models::quadratic(x, y),
        FitKind::Exponential => models::exponential(x, y),
    }?;

    log::debug!(
        "{} fit: coefficients {:?}, error {:.6}",
        kind,
        result.coefficients,
        result.error
    );
    Ok(result)
}

/// `sum (observed - fitted)^2`.
pub fn sum_squared_residuals(observed: &[f64], fitted: &[f64]) -> f64 {
    observed
        .iter()
        .zip(fitted)
        .map(|(o, g)| (o - g) * (o - g))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_linear_collinear_points() {
        let result = fit(FitKind::Linear, &[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert_abs_diff_eq!(result.coefficients[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.error, 0.0, epsilon = 1e-20);
        assert_eq!(result.equation(), "G(x) = 1.0000 + 2.0000*x");
    }

    #[test]
    fn test_linear_least_squares() {
        // Best line through (0,0), (1,1), (2,1): a0 = 1/6, a1 = 1/2
        let result = fit(FitKind::Linear, &[0.0, 1.0, 2.0], &[0.0, 1.0, 1.0]).unwrap();
        assert_relative_eq!(result.coefficients[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(result.coefficients[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(result.error, 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quadratic_exact_parabola() {
        let x = [-1.0, 0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 - 3.0 * v + 0.5 * v * v).collect();
        let result = fit(FitKind::Quadratic, &x, &y).unwrap();
        assert_abs_diff_eq!(result.coefficients[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(result.coefficients[1], -3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(result.coefficients[2], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(result.error, 0.0, epsilon = 1e-18);
        assert_abs_diff_eq!(result.evaluate(4.0), 2.0 - 12.0 + 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic_needs_three_points() {
        let err = fit(FitKind::Quadratic, &[0.0, 1.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            NumkitError::InsufficientPoints {
                required: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_exponential_recovers_curve() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v: &f64| 3.0 * (0.5 * v).exp()).collect();
        let result = fit(FitKind::Exponential, &x, &y).unwrap();
        assert_relative_eq!(result.coefficients[0], 3.0f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(result.coefficients[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result.error, 0.0, epsilon = 1e-18);
        assert_relative_eq!(result.fitted[2], y[2], epsilon = 1e-12);
        assert_eq!(result.equation(), "G(x) = 3.0000 * e^(0.5000*x)");
    }

    #[test]
    fn test_exponential_error_in_original_space() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 3.0, 8.0];
        let result = fit(FitKind::Exponential, &x, &y).unwrap();
        let expected: f64 = x
            .iter()
            .zip(&y)
            .map(|(xi, yi)| {
                let g = (result.coefficients[0] + result.coefficients[1] * xi).exp();
                (yi - g) * (yi - g)
            })
            .sum();
        assert_relative_eq!(result.error, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_rejects_non_positive() {
        let err = fit(FitKind::Exponential, &[0.0, 1.0, 2.0], &[1.0, 0.0, 2.0]).unwrap_err();
        assert!(matches!(err, NumkitError::NonPositiveValues { index: 1, .. }));

        let err = fit(FitKind::Exponential, &[0.0, 1.0], &[-1.0, 2.0]).unwrap_err();
        assert!(matches!(err, NumkitError::NonPositiveValues { index: 0, .. }));
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            fit(FitKind::Linear, &[0.0, 1.0], &[1.0]),
            Err(NumkitError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            fit(FitKind::Linear, &[0.0], &[1.0]),
            Err(NumkitError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_degenerate_x_is_singular() {
        let err = fit(FitKind::Linear, &[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, NumkitError::SingularMatrix));
    }

    #[test]
    fn test_abscissae_far_from_zero() {
        let x = [2000.0, 2001.0, 2002.0, 2003.0];
        let y = [1.0, 2.0, 5.0, 10.0];
        let result = fit(FitKind::Quadratic, &x, &y).unwrap();
        // y = (x - 2000)^2 + 1
        assert_abs_diff_eq!(result.coefficients[2], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.coefficients[1], -4000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.coefficients[0], 4_000_001.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.error, 0.0, epsilon = 1e-12);
        for (g, o) in result.fitted.iter().zip(&y) {
            assert_abs_diff_eq!(*g, *o, epsilon = 1e-9);
        }

        let x = [1e7, 1e7 + 1.0, 1e7 + 2.0];
        let result = fit(FitKind::Linear, &x, &[1.0, 3.0, 5.0]).unwrap();
        assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.coefficients[0], 1.0 - 2e7, epsilon = 1e-6);
        assert_abs_diff_eq!(result.error, 0.0, epsilon = 1e-18);
        assert_abs_diff_eq!(result.fitted[2], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_kind_from_str() {
        assert_eq!("Linear".parse::<FitKind>().unwrap(), FitKind::Linear);
        assert_eq!("exp".parse::<FitKind>().unwrap(), FitKind::Exponential);
        assert!("cubic".parse::<FitKind>().is_err());
    }
}
