//! Fitting several models to the same samples.

use crate::error::NumkitError;

use super::{fit, FitKind, FitResult};

/// Outcome of fitting several models: successes and per-model failures.
#[derive(Debug, Default)]
pub struct FitBatch {
    /// Successful fits in evaluation order
    pub fits: Vec<FitResult>,
    /// Models that could not be fitted, with the reason
    pub failures: Vec<(FitKind, NumkitError)>,
}

impl FitBatch {
    /// The fit with the smallest sum of squared residuals.
    ///
    /// Ties go to the model evaluated first (Linear, Quadratic, Exponential).
    pub fn best(&self) -> Option<&FitResult> {
        let mut best: Option<&FitResult> = None;
        for candidate in self.fits.iter().filter(|f| !f.error.is_nan()) {
            match best {
                Some(current) if candidate.error >= current.error => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// Look up the fit for one model, if it succeeded.
    pub fn get(&self, kind: FitKind) -> Option<&FitResult> {
        self.fits.iter().find(|f| f.kind == kind)
    }

    /// Whether every requested model failed.
    pub fn is_empty(&self) -> bool {
        self.fits.is_empty()
    }
}

/// Fit every requested model independently.
///
/// Models run in the fixed order Linear, Quadratic, Exponential regardless of
/// the order in `kinds`; duplicates are fitted once. A failing model is
/// recorded in [`FitBatch::failures`] and does not stop the others.
pub fn fit_all(kinds: &[FitKind], x: &[f64], y: &[f64]) -> FitBatch {
    let mut batch = FitBatch::default();
    for kind in FitKind::ALL.iter().copied().filter(|k| kinds.contains(k)) {
        match fit(kind, x, y) {
            Ok(result) => batch.fits.push(result),
            Err(e) => {
                log::debug!("{} fit skipped: {}", kind, e);
                batch.failures.push((kind, e));
            }
        }
    }
    batch
}
