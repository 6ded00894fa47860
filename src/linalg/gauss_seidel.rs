//! Gauss-Seidel iteration for linear systems.

use std::fmt;

use crate::error::{NumkitError, Result};

use super::matrix::{nan_max, Matrix};
use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Configuration for the Gauss-Seidel solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussSeidelConfig {
    /// Maximum number of sweeps.
    pub max_iterations: usize,
    /// Convergence tolerance on the infinity norm of the update.
    pub tolerance: f64,
}

impl Default for GaussSeidelConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl GaussSeidelConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of sweeps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    ///
    /// The iteration stops once `max_i |x_new[i] - x[i]| < tolerance`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Why a Gauss-Seidel run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The update fell below the tolerance.
    Converged,
    /// All sweeps were used without meeting the tolerance.
    MaxIterationsReached,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::MaxIterationsReached => write!(f, "max iterations reached"),
        }
    }
}

/// Outcome of a Gauss-Seidel run.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussSeidelRun {
    /// Final estimate
    pub solution: Vec<f64>,
    /// Every iterate, starting with the initial guess
    pub history: Vec<Vec<f64>>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Termination reason
    pub termination: Termination,
    /// Infinity norm of the last update (0 when no sweep ran)
    pub last_change: f64,
}

impl GaussSeidelRun {
    /// Whether the run met the tolerance.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Gauss-Seidel solver.
#[derive(Debug, Clone, Default)]
pub struct GaussSeidel {
    config: GaussSeidelConfig,
}

impl GaussSeidel {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with a custom configuration.
    pub fn with_config(config: GaussSeidelConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &GaussSeidelConfig {
        &self.config
    }

    /// Run Gauss-Seidel sweeps on `Ax = b` starting from `x0`.
    ///
    /// Exhausting `max_iterations` is not an error: the returned run carries
    /// [`Termination::MaxIterationsReached`] and the last iterate.
    pub fn solve(&self, a: &Matrix, b: &[f64], x0: &[f64]) -> Result<GaussSeidelRun> {
        let n = self.check_preconditions(a, b, x0)?;
        let tolerance = self.config.tolerance;

        if !a.is_diagonally_dominant() {
            log::debug!("matrix is not strictly diagonally dominant; convergence is not guaranteed");
        }

        let mut x = x0.to_vec();
        let mut history = vec![x.clone()];
        let mut last_change = 0.0f64;
        log::trace!("iteration 0: {:?}", x);

        for k in 1..=self.config.max_iterations {
            let mut x_new = x.clone();

            for i in 0..n {
                let mut sum = 0.0;
                for j in 0..n {
                    if j < i {
                        sum += a.get(i, j) * x_new[j];
                    } else if j > i {
                        sum += a.get(i, j) * x[j];
                    }
                }
                x_new[i] = (b[i] - sum) / a.get(i, i);
            }

            last_change = x_new
                .iter()
                .zip(&x)
                .fold(0.0f64, |acc, (new, old)| nan_max(acc, (new - old).abs()));

            history.push(x_new.clone());
            x = x_new;
            log::trace!("iteration {}: {:?} (change {:.3e})", k, x, last_change);

            // NaN never compares below the tolerance, so overflowed iterates keep sweeping
            if last_change < tolerance {
                log::debug!("Gauss-Seidel converged at iteration {}", k);
                return Ok(GaussSeidelRun {
                    solution: x,
                    history,
                    iterations: k,
                    termination: Termination::Converged,
                    last_change,
                });
            }
        }

        log::warn!(
            "Gauss-Seidel stopped after {} iterations without convergence (change {:.3e}, tolerance {:.1e})",
            self.config.max_iterations,
            last_change,
            tolerance
        );

        Ok(GaussSeidelRun {
            solution: x,
            history,
            iterations: self.config.max_iterations,
            termination: Termination::MaxIterationsReached,
            last_change,
        })
    }

    fn check_preconditions(&self, a: &Matrix, b: &[f64], x0: &[f64]) -> Result<usize> {
        let n = a.ensure_square("Gauss-Seidel")?;
        if b.len() != n {
            return Err(NumkitError::dimension_mismatch("right-hand side", n, b.len()));
        }
        if x0.len() != n {
            return Err(NumkitError::dimension_mismatch("initial guess", n, x0.len()));
        }
        if !(self.config.tolerance.is_finite() && self.config.tolerance > 0.0) {
            return Err(NumkitError::invalid_parameter(format!(
                "tolerance must be finite and positive, got {}",
                self.config.tolerance
            )));
        }
        if let Some(row) = (0..n).find(|&i| a.get(i, i) == 0.0) {
            return Err(NumkitError::ZeroDiagonal { row });
        }
        Ok(n)
    }
}

/// Run Gauss-Seidel with explicit limits.
pub fn gauss_seidel(
    a: &Matrix,
    b: &[f64],
    x0: &[f64],
    max_iterations: usize,
    tolerance: f64,
) -> Result<GaussSeidelRun> {
    let config = GaussSeidelConfig::new()
        .with_max_iterations(max_iterations)
        .with_tolerance(tolerance);
    GaussSeidel::with_config(config).solve(a, b, x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::solve;
    use approx::assert_abs_diff_eq;

    fn bridge() -> (Matrix, Vec<f64>) {
        let a = Matrix::from_rows(&[
            [260.0, -120.0, -120.0],
            [-120.0, 360.0, -120.0],
            [-120.0, -120.0, 240.0],
        ])
        .unwrap();
        (a, vec![30.0, 0.0, 0.0])
    }

    #[test]
    fn test_converges_on_bridge_system() {
        let (a, b) = bridge();
        let run = gauss_seidel(&a, &b, &[0.0; 3], 50, 1e-6).unwrap();

        assert!(run.converged());
        assert!(run.iterations < 50);
        assert_eq!(run.history.len(), run.iterations + 1);
        assert_eq!(run.history[0], vec![0.0; 3]);
        assert_eq!(run.history.last().unwrap(), &run.solution);
        assert!(run.last_change < 1e-6);

        // The update norm underestimates the true error on this slowly
        // contracting system, so compare against the direct solution loosely.
        let direct = solve(&a, &b).unwrap();
        for (gs, lu) in run.solution.iter().zip(&direct) {
            assert_abs_diff_eq!(*gs, *lu, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_tight_tolerance_matches_direct_solve() {
        let (a, b) = bridge();
        let run = gauss_seidel(&a, &b, &[0.0; 3], 200, 1e-9).unwrap();
        assert!(run.converged());

        let direct = solve(&a, &b).unwrap();
        for (gs, lu) in run.solution.iter().zip(&direct) {
            assert_abs_diff_eq!(*gs, *lu, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_first_sweep_uses_fresh_values() {
        let (a, b) = bridge();
        let run = gauss_seidel(&a, &b, &[0.0; 3], 1, 1e-6).unwrap();
        let x1 = 30.0 / 260.0;
        let x2 = 120.0 * x1 / 360.0;
        let x3 = (120.0 * x1 + 120.0 * x2) / 240.0;
        assert_abs_diff_eq!(run.solution[0], x1, epsilon = 1e-15);
        assert_abs_diff_eq!(run.solution[1], x2, epsilon = 1e-15);
        assert_abs_diff_eq!(run.solution[2], x3, epsilon = 1e-15);
    }

    #[test]
    fn test_max_iterations_reached() {
        let (a, b) = bridge();
        let run = gauss_seidel(&a, &b, &[0.0; 3], 3, 1e-12).unwrap();
        assert!(!run.converged());
        assert_eq!(run.termination, Termination::MaxIterationsReached);
        assert_eq!(run.iterations, 3);
        assert_eq!(run.history.len(), 4);
    }

    #[test]
    fn test_overflowing_iterates_never_converge() {
        let a = Matrix::from_rows(&[[1.0, 1e200], [1e200, 1.0]]).unwrap();
        let run = gauss_seidel(&a, &[1.0, 1.0], &[0.0; 2], 10, 1e-6).unwrap();

        assert!(!run.converged());
        assert_eq!(run.termination, Termination::MaxIterationsReached);
        assert_eq!(run.iterations, 10);
        assert_eq!(run.history.len(), 11);
        assert!(run.last_change.is_nan());
        assert!(run.solution.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_zero_iterations_returns_initial_guess() {
        let (a, b) = bridge();
        let run = gauss_seidel(&a, &b, &[1.0, 2.0, 3.0], 0, 1e-6).unwrap();
        assert_eq!(run.solution, vec![1.0, 2.0, 3.0]);
        assert_eq!(run.history.len(), 1);
        assert_eq!(run.iterations, 0);
        assert!(!run.converged());
    }

    #[test]
    fn test_zero_diagonal() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 0.0], [3.0, 0.0, 1.0], [0.0, 1.0, 4.0]]).unwrap();
        let err = gauss_seidel(&a, &[1.0, 1.0, 1.0], &[0.0; 3], 10, 1e-6).unwrap_err();
        assert!(matches!(err, NumkitError::ZeroDiagonal { row: 1 }));
    }

    #[test]
    fn test_preconditions() {
        let (a, b) = bridge();
        assert!(matches!(
            gauss_seidel(&a, &b, &[0.0; 2], 10, 1e-6),
            Err(NumkitError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            gauss_seidel(&a, &b[..2], &[0.0; 3], 10, 1e-6),
            Err(NumkitError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            gauss_seidel(&a, &b, &[0.0; 3], 10, 0.0),
            Err(NumkitError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let (a, b) = bridge();
        let solver = GaussSeidel::new();
        let first = solver.solve(&a, &b, &[0.0; 3]).unwrap();
        let second = solver.solve(&a, &b, &[0.0; 3]).unwrap();
        assert_eq!(first, second);
    }
}
