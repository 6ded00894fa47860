//! # Numkit Core
//!
//! Classical numerical methods with explicit error semantics.
//!
//! This library provides:
//! - Direct solution of dense linear systems (LU with partial pivoting)
//! - Gauss-Seidel iteration with a full convergence history
//! - Least-squares fitting of linear, quadratic and exponential models
//! - Composite trapezoid and Simpson's 1/3 quadrature
//!
//! ## Architecture
//!
//! - [`linalg`] - Matrices, the direct solver and Gauss-Seidel
//! - [`fit`] - Normal-equation curve fitting and model comparison
//! - [`quadrature`] - Composite rules over equally spaced samples
//! - [`expr`] - The [`FunctionEvaluator`] boundary and a built-in expression language
//! - [`series`] - `(x, y)` sample series shared by fitting and quadrature
//! - [`presets`] - Worked examples offered by the front-ends
//! - [`session`] - Presenter state kept between interactions
//! - [`input`] - Parsing numbers, matrices and data files
//! - [`cli`] - Command line front-end (CLI only)
//!
//! The kernels keep no state: every call builds its result from its
//! arguments alone, so identical inputs give identical outputs.
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! numkit solve --matrix "4 1; 2 3" --rhs "1 2"
//! numkit gauss-seidel --history
//! numkit fit --x "0 1 2 3" --y "1 3 5 7" --kind linear
//! numkit integrate --function "x**2" --from 0 --to 2 --subintervals 4
//! ```
//!
//! ### Library
//!
//! ```
//! use numkit_core::linalg::{solve, Matrix};
//! use numkit_core::quadrature::simpson;
//!
//! let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
//! let x = solve(&a, &[3.0, 5.0]).unwrap();
//! assert!((x[0] - 0.8).abs() < 1e-12 && (x[1] - 1.4).abs() < 1e-12);
//!
//! let area = simpson(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
//! assert!((area - 8.0 / 3.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod expr;
pub mod fit;
pub mod input;
pub mod linalg;
pub mod presets;
pub mod quadrature;
pub mod series;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for convenience
pub use error::{NumkitError, Result};
pub use expr::{ExpressionEvaluator, FunctionEvaluator};
pub use fit::{fit, fit_all, FitKind, FitResult};
pub use linalg::{gauss_seidel, solve, GaussSeidelRun, Matrix};
pub use quadrature::{simpson, trapezoid};
pub use series::SampleSeries;

// WASM bindings
#[cfg(feature = "wasm")]
pub mod wasm;
