//! Dense linear system solvers.
//!
//! Two ways of solving `Ax = b`:
//!
//! - [`solve`] factors `A` with LU decomposition and partial pivoting
//!   ([`LuDecomposition`]), then runs forward and back substitution.
//! - [`GaussSeidel`] sweeps the unknowns in index order, using each freshly
//!   updated component within the same sweep:
//!
//! ```text
//! x_new[i] = (b[i] - sum_{j<i} A[i,j] x_new[j] - sum_{j>i} A[i,j] x[j]) / A[i,i]
//! ```
//!
//! and stops once `max_i |x_new[i] - x[i]|` drops below the tolerance or the
//! sweep budget runs out. Every iterate is kept in the run history.

mod gauss_seidel;
mod lu;
mod matrix;
mod production;

pub use gauss_seidel::{gauss_seidel, GaussSeidel, GaussSeidelConfig, GaussSeidelRun, Termination};
pub use lu::{solve, LuDecomposition};
pub use matrix::{residual_norm, LinearSystem, Matrix};
pub use production::ProductionPlan;

/// Default convergence tolerance for Gauss-Seidel.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum number of Gauss-Seidel sweeps.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Pivots smaller than this fraction of the largest entry in their own row are treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-12;
