//! Discrete `(x, y)` observations shared by the fitting and quadrature kernels.

use crate::error::{NumkitError, Result};

/// Absolute tolerance for the equal-spacing check.
pub const SPACING_ABS_TOLERANCE: f64 = 1e-8;

/// Relative tolerance (against the first step) for the equal-spacing check.
pub const SPACING_REL_TOLERANCE: f64 = 1e-5;

/// Paired samples of an independent and a dependent variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSeries {
    /// Pair `x` with `y`; both must have the same length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        check_lengths(&x, &y)?;
        Ok(Self { x, y })
    }

    /// Independent variable.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Dependent variable.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Constant step of an equally spaced series, see [`uniform_step`].
    pub fn step(&self) -> Result<f64> {
        uniform_step(&self.x)
    }
}

/// Fail with [`NumkitError::DimensionMismatch`] unless `x` and `y` pair up.
pub(crate) fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(NumkitError::dimension_mismatch("sample series", x.len(), y.len()));
    }
    Ok(())
}

/// Step `h = x[1] - x[0]` of an equally spaced grid.
///
/// Every consecutive difference `d` must satisfy
/// `|d - h| <= SPACING_ABS_TOLERANCE + SPACING_REL_TOLERANCE * |h|`.
/// Needs at least two points. A non-finite abscissa breaks the spacing at
/// the first interval it touches.
pub fn uniform_step(x: &[f64]) -> Result<f64> {
    if x.len() < 2 {
        return Err(NumkitError::insufficient_points("equal spacing", 2, x.len()));
    }
    let h = x[1] - x[0];
    if !h.is_finite() {
        return Err(NumkitError::UnevenSpacing { index: 0 });
    }
    let allowed = SPACING_ABS_TOLERANCE + SPACING_REL_TOLERANCE * h.abs();
    for (index, pair) in x.windows(2).enumerate().skip(1) {
        let within = ((pair[1] - pair[0]) - h).abs() <= allowed;
        if !within {
            return Err(NumkitError::UnevenSpacing { index });
        }
    }
    Ok(h)
}

/// `n + 1` equally spaced points from `a` to `b` inclusive.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![a];
    }
    let h = (b - a) / n as f64;
    (0..=n)
        .map(|i| if i == n { b } else { a + h * i as f64 })
        .collect()
}
