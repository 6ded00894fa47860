//! Integrating a textual function sampled on a uniform grid.

use crate::error::{NumkitError, Result};
use crate::expr::FunctionEvaluator;
use crate::series::{linspace, SampleSeries};

use super::{integrate, QuadratureReport};

/// A sampled function and the quadrature estimates over it.
#[derive(Debug)]
pub struct SampledIntegral {
    /// The grid and the function values on it
    pub series: SampleSeries,
    /// Trapezoid and Simpson estimates
    pub report: QuadratureReport,
}

/// Sample `expression` at `n + 1` equally spaced points over `[a, b]`.
///
/// Evaluator errors propagate unchanged. Any infinite or NaN value fails
/// with [`NumkitError::NonFiniteSample`].
pub fn sample_function<E: FunctionEvaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    a: f64,
    b: f64,
    n: usize,
) -> Result<SampleSeries> {
    if n == 0 {
        return Err(NumkitError::invalid_parameter(
            "number of subintervals must be positive",
        ));
    }
    if !(a.is_finite() && b.is_finite()) || b <= a {
        return Err(NumkitError::invalid_parameter(format!(
            "upper limit must be greater than lower limit (got a = {}, b = {})",
            a, b
        )));
    }

    let x = linspace(a, b, n);
    let y = evaluator.evaluate(expression, &x)?;
    if y.len() != x.len() {
        return Err(NumkitError::dimension_mismatch("evaluated samples", x.len(), y.len()));
    }
    if let Some(i) = y.iter().position(|v| !v.is_finite()) {
        return Err(NumkitError::NonFiniteSample { x: x[i] });
    }

    log::debug!("sampled '{}' at {} points over [{}, {}]", expression, x.len(), a, b);
    SampleSeries::new(x, y)
}

/// Sample `expression` over `[a, b]` with `n` subintervals and apply both rules.
pub fn integrate_function<E: FunctionEvaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    a: f64,
    b: f64,
    n: usize,
) -> Result<SampledIntegral> {
    let series = sample_function(evaluator, expression, a, b, n)?;
    let report = integrate(&series);
    Ok(SampledIntegral { series, report })
}
