//! WASM bindings for a browser dashboard.
//!
//! Matrices cross the boundary as flat row-major `Float64Array`s together
//! with their dimension. Errors are returned as strings.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { solve_linear, gauss_seidel, fit_curve, integrate_function } from 'numkit_core';
//!
//! await init();
//!
//! const x = solve_linear(new Float64Array([2, 1, 1, 3]), 2, new Float64Array([3, 5]));
//! const run = gauss_seidel(a, 3, b, new Float64Array(3), 50, 1e-6);
//! console.log(run.iterations, run.converged, run.solution);
//!
//! const fit = fit_curve("exponential", xs, ys);
//! console.log(fit.equation, fit.error);
//!
//! const q = integrate_function("x**2", 0, 2, 4);
//! console.log(q.trapezoid, q.simpson ?? q.simpson_error);
//! ```

use wasm_bindgen::prelude::*;

use crate::error::NumkitError;
use crate::expr::ExpressionEvaluator;
use crate::fit::{FitKind, FitResult};
use crate::linalg::{GaussSeidel, GaussSeidelConfig, GaussSeidelRun, Matrix};
use crate::quadrature::{self, QuadratureReport};
use crate::series::SampleSeries;

fn to_js(e: NumkitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Solve `A x = b` directly. `matrix` is `n * n` values in row-major order.
#[wasm_bindgen]
pub fn solve_linear(matrix: &[f64], n: usize, rhs: &[f64]) -> Result<Vec<f64>, JsValue> {
    let a = Matrix::from_row_slice(n, n, matrix).map_err(to_js)?;
    crate::linalg::solve(&a, rhs).map_err(to_js)
}

/// Result of a Gauss-Seidel run.
#[wasm_bindgen]
pub struct WasmIterativeRun {
    run: GaussSeidelRun,
}

#[wasm_bindgen]
impl WasmIterativeRun {
    /// Final iterate
    #[wasm_bindgen(getter)]
    pub fn solution(&self) -> Vec<f64> {
        self.run.solution.clone()
    }

    /// Number of sweeps performed
    #[wasm_bindgen(getter)]
    pub fn iterations(&self) -> usize {
        self.run.iterations
    }

    /// Whether the tolerance was met
    #[wasm_bindgen(getter)]
    pub fn converged(&self) -> bool {
        self.run.converged()
    }

    /// Largest component change in the last sweep
    #[wasm_bindgen(getter)]
    pub fn last_change(&self) -> f64 {
        self.run.last_change
    }

    /// Every iterate, starting with the initial guess, flattened row by row.
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> Vec<f64> {
        self.run.history.concat()
    }
}

/// Gauss-Seidel iteration on an `n * n` row-major matrix.
#[wasm_bindgen]
pub fn gauss_seidel(
    matrix: &[f64],
    n: usize,
    rhs: &[f64],
    initial: &[f64],
    max_iterations: usize,
    tolerance: f64,
) -> Result<WasmIterativeRun, JsValue> {
    let a = Matrix::from_row_slice(n, n, matrix).map_err(to_js)?;
    let config = GaussSeidelConfig::new()
        .with_max_iterations(max_iterations)
        .with_tolerance(tolerance);
    let run = GaussSeidel::with_config(config)
        .solve(&a, rhs, initial)
        .map_err(to_js)?;
    Ok(WasmIterativeRun { run })
}

/// A fitted curve.
#[wasm_bindgen]
pub struct WasmFit {
    result: FitResult,
}

#[wasm_bindgen]
impl WasmFit {
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.result.kind.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn coefficients(&self) -> Vec<f64> {
        self.result.coefficients.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn fitted(&self) -> Vec<f64> {
        self.result.fitted.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> f64 {
        self.result.error
    }

    #[wasm_bindgen(getter)]
    pub fn equation(&self) -> String {
        self.result.equation()
    }

    /// Evaluate the fitted model at `x`.
    #[wasm_bindgen]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.result.evaluate(x)
    }
}

/// Fit `kind` ("linear", "quadratic" or "exponential") to the samples.
#[wasm_bindgen]
pub fn fit_curve(kind: &str, x: &[f64], y: &[f64]) -> Result<WasmFit, JsValue> {
    let kind: FitKind = kind.parse().map_err(to_js)?;
    let result = crate::fit::fit(kind, x, y).map_err(to_js)?;
    Ok(WasmFit { result })
}

/// Both composite rules over one series.
#[wasm_bindgen]
pub struct WasmQuadrature {
    report: QuadratureReport,
}

#[wasm_bindgen]
impl WasmQuadrature {
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> usize {
        self.report.points
    }

    #[wasm_bindgen(getter)]
    pub fn step(&self) -> Option<f64> {
        self.report.step
    }

    #[wasm_bindgen(getter)]
    pub fn trapezoid(&self) -> Option<f64> {
        self.report.trapezoid.as_ref().ok().copied()
    }

    #[wasm_bindgen(getter)]
    pub fn trapezoid_error(&self) -> Option<String> {
        self.report.trapezoid.as_ref().err().map(ToString::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn simpson(&self) -> Option<f64> {
        self.report.simpson.as_ref().ok().copied()
    }

    #[wasm_bindgen(getter)]
    pub fn simpson_error(&self) -> Option<String> {
        self.report.simpson.as_ref().err().map(ToString::to_string)
    }
}

/// Integrate tabulated samples.
#[wasm_bindgen]
pub fn integrate_samples(x: &[f64], y: &[f64]) -> Result<WasmQuadrature, JsValue> {
    let series = SampleSeries::new(x.to_vec(), y.to_vec()).map_err(to_js)?;
    Ok(WasmQuadrature {
        report: quadrature::integrate(&series),
    })
}

/// Integrate an expression in `x` over `[a, b]` with `n` subintervals.
#[wasm_bindgen]
pub fn integrate_function(
    expression: &str,
    a: f64,
    b: f64,
    n: usize,
) -> Result<WasmQuadrature, JsValue> {
    let sampled = quadrature::integrate_function(&ExpressionEvaluator, expression, a, b, n)
        .map_err(to_js)?;
    Ok(WasmQuadrature {
        report: sampled.report,
    })
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
