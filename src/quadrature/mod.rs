//! Composite quadrature over equally spaced samples.
//!
//! Both rules take the step `h = x[1] - x[0]` of an equally spaced grid:
//!
//! ```text
//! trapezoid: (h/2) (y0 + 2 sum_{i=1}^{N-2} yi + y_{N-1})
//! simpson:   (h/3) (y0 + 4 sum_{odd i} yi + 2 sum_{even i} yi + y_{N-1})
//! ```
//!
//! Simpson's 1/3 rule additionally needs an even number of subintervals
//! (`N - 1`). Sampling a textual function onto a grid goes through a
//! [`FunctionEvaluator`](crate::expr::FunctionEvaluator), see
//! [`integrate_function`].

mod sampled;

pub use sampled::{integrate_function, sample_function, SampledIntegral};

use std::fmt;

use crate::error::{NumkitError, Result};
use crate::series::{check_lengths, uniform_step, SampleSeries};

/// Composite trapezoid rule.
///
/// # Errors
///
/// [`NumkitError::InsufficientPoints`] below two points,
/// [`NumkitError::DimensionMismatch`] for unequal lengths and
/// [`NumkitError::UnevenSpacing`] when `x` is not equally spaced.
pub fn trapezoid(x: &[f64], y: &[f64]) -> Result<f64> {
    check_lengths(x, y)?;
    let n = x.len();
    if n < 2 {
        return Err(NumkitError::insufficient_points("Trapezoid rule", 2, n));
    }
    let h = uniform_step(x)?;

    let interior: f64 = y[1..n - 1].iter().sum();
    Ok(h / 2.0 * (y[0] + 2.0 * interior + y[n - 1]))
}

/// Composite Simpson's 1/3 rule.
///
/// # Errors
///
/// [`NumkitError::InsufficientPoints`] below three points,
/// [`NumkitError::OddSubintervalCount`] when `N - 1` is odd, plus the shape
/// and spacing errors of [`trapezoid`].
pub fn simpson(x: &[f64], y: &[f64]) -> Result<f64> {
    check_lengths(x, y)?;
    let n = x.len();
    if n < 3 {
        return Err(NumkitError::insufficient_points("Simpson's 1/3 rule", 3, n));
    }
    if (n - 1) % 2 != 0 {
        return Err(NumkitError::OddSubintervalCount { subintervals: n - 1 });
    }
    let h = uniform_step(x)?;

    let odd: f64 = y[1..n - 1].iter().step_by(2).sum();
    let even: f64 = y[2..n - 1].iter().step_by(2).sum();
    Ok(h / 3.0 * (y[0] + 4.0 * odd + 2.0 * even + y[n - 1]))
}

/// Both rules applied to one series, each attempted independently.
#[derive(Debug)]
pub struct QuadratureReport {
    /// Number of samples
    pub points: usize,
    /// Step between samples, when it could be determined
    pub step: Option<f64>,
    /// Composite trapezoid estimate
    pub trapezoid: Result<f64>,
    /// Composite Simpson's 1/3 estimate
    pub simpson: Result<f64>,
}

impl QuadratureReport {
    /// Whether at least one rule produced an estimate.
    pub fn has_estimate(&self) -> bool {
        self.trapezoid.is_ok() || self.simpson.is_ok()
    }
}

impl fmt::Display for QuadratureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<25} {:<20}", "Method", "Result")?;
        writeln!(f, "{}", "-".repeat(45))?;
        for (name, result) in [
            ("Trapezoid (composite)", &self.trapezoid),
            ("Simpson 1/3 (composite)", &self.simpson),
        ] {
            match result {
                Ok(value) => writeln!(f, "{:<25} {:<20.6}", name, value)?,
                Err(e) => writeln!(f, "{:<25} {}", name, e)?,
            }
        }
        write!(f, "{}", "-".repeat(45))
    }
}

/// Apply both composite rules to a series.
///
/// A Simpson precondition failure does not prevent the trapezoid estimate.
pub fn integrate(series: &SampleSeries) -> QuadratureReport {
    let (x, y) = (series.x(), series.y());
    let report = QuadratureReport {
        points: series.len(),
        step: series.step().ok(),
        trapezoid: trapezoid(x, y),
        simpson: simpson(x, y),
    };
    if let Err(e) = &report.simpson {
        log::debug!("Simpson's rule not applied: {}", e);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_on_unit_grid() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 4.0];
        assert_relative_eq!(trapezoid(&x, &y).unwrap(), 3.0);
        assert_relative_eq!(simpson(&x, &y).unwrap(), 8.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_simpson_exact_for_cubic() {
        let x: Vec<f64> = (0..=8).map(|i| i as f64 * 0.25).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v * v - v).collect();
        // Integral of x^3 - x over [0, 2] = 4 - 2
        assert_relative_eq!(simpson(&x, &y).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trapezoid_exact_for_line() {
        let x = [1.0, 1.5, 2.0, 2.5];
        let y = [3.0, 4.0, 5.0, 6.0];
        assert_relative_eq!(trapezoid(&x, &y).unwrap(), 6.75, epsilon = 1e-12);
    }

    #[test]
    fn test_river_cross_section() {
        let x: Vec<f64> = (0..=10).map(|i| 2.0 * i as f64).collect();
        let y = [0.0, 1.8, 4.0, 4.0, 5.0, 6.0, 4.0, 3.6, 3.4, 2.8, 0.0];
        assert_relative_eq!(trapezoid(&x, &y).unwrap(), 69.2, epsilon = 1e-12);
        assert_relative_eq!(simpson(&x, &y).unwrap(), 70.4, epsilon = 1e-12);
    }

    #[test]
    fn test_point_count_preconditions() {
        assert!(matches!(
            trapezoid(&[1.0], &[1.0]),
            Err(NumkitError::InsufficientPoints { required: 2, .. })
        ));
        assert!(matches!(
            simpson(&[0.0, 1.0], &[1.0, 1.0]),
            Err(NumkitError::InsufficientPoints { required: 3, .. })
        ));
        assert!(matches!(
            simpson(&[0.0, 1.0, 2.0, 3.0], &[1.0; 4]),
            Err(NumkitError::OddSubintervalCount { subintervals: 3 })
        ));
    }

    #[test]
    fn test_uneven_spacing_rejected() {
        assert!(matches!(
            trapezoid(&[0.0, 1.0, 3.0], &[1.0, 1.0, 1.0]),
            Err(NumkitError::UnevenSpacing { .. })
        ));
    }

    #[test]
    fn test_nan_abscissa_rejected() {
        assert!(matches!(
            trapezoid(&[0.0, 1.0, f64::NAN], &[1.0, 1.0, 1.0]),
            Err(NumkitError::UnevenSpacing { index: 1 })
        ));
        assert!(matches!(
            simpson(&[0.0, 1.0, f64::NAN], &[1.0, 1.0, 1.0]),
            Err(NumkitError::UnevenSpacing { index: 1 })
        ));
    }

    #[test]
    fn test_descending_grid_gives_signed_integral() {
        let x = [2.0, 1.0, 0.0];
        let y = [4.0, 1.0, 0.0];
        assert_relative_eq!(simpson(&x, &y).unwrap(), -8.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_integrate_collects_independently() {
        let series = SampleSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();
        let report = integrate(&series);
        assert_eq!(report.points, 4);
        assert_eq!(report.step, Some(1.0));
        assert_relative_eq!(*report.trapezoid.as_ref().unwrap(), 9.5);
        assert!(matches!(
            report.simpson,
            Err(NumkitError::OddSubintervalCount { .. })
        ));
        assert!(report.has_estimate());
    }
}
