//! Error types for the numkit numerical kernels.
//!
//! This module provides a unified error type [`NumkitError`] that covers
//! every failure the kernels can report: shape problems, singular systems,
//! violated method preconditions, expression parsing and presenter input.

use thiserror::Error;

/// Result type alias using [`NumkitError`].
pub type Result<T> = std::result::Result<T, NumkitError>;

/// Unified error type for all numkit operations.
#[derive(Error, Debug)]
pub enum NumkitError {
    // ============ Linear Algebra Errors ============
    /// Matrix/vector shapes are inconsistent
    #[error("Dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Matrix is singular and the system has no unique solution
    #[error("Singular matrix - the system has no unique solution")]
    SingularMatrix,

    /// Gauss-Seidel cannot divide by a zero diagonal entry
    #[error("Zero diagonal entry at row {row} - Gauss-Seidel requires a non-zero diagonal")]
    ZeroDiagonal { row: usize },

    // ============ Sample Data Errors ============
    /// Fewer samples than the method needs
    #[error("{method} requires at least {required} points, got {found}")]
    InsufficientPoints {
        method: &'static str,
        required: usize,
        found: usize,
    },

    /// Simpson's 1/3 rule needs an even number of subintervals
    #[error("Simpson's 1/3 rule requires an even number of subintervals, got {subintervals}")]
    OddSubintervalCount { subintervals: usize },

    /// Exponential fit needs strictly positive observations
    #[error("Exponential fit requires positive values, got {value} at index {index}")]
    NonPositiveValues { index: usize, value: f64 },

    /// Quadrature abscissae are not equally spaced
    #[error("Sample points are not equally spaced (first deviation at interval {index})")]
    UnevenSpacing { index: usize },

    /// A sampled function value is infinite or NaN
    #[error("Function produced a non-finite value at x = {x}")]
    NonFiniteSample { x: f64 },

    // ============ Expression Errors ============
    /// Expression text could not be parsed
    #[error("Parse error at column {column}: {message}")]
    ParseFailure { column: usize, message: String },

    /// Expression could not be evaluated
    #[error("Evaluation error: {message}")]
    EvaluationFailure { message: String },

    // ============ Parameter and Input Errors ============
    /// Invalid method parameter (tolerance, interval, subinterval count)
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Presenter-side input that is not a list of numbers
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ============ I/O Errors ============
    /// Error reading a data file
    #[error("Failed to read data file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing results
    #[error("Failed to write output: {0}")]
    OutputError(#[from] std::io::Error),
}

impl NumkitError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Create an insufficient points error
    pub fn insufficient_points(method: &'static str, required: usize, found: usize) -> Self {
        Self::InsufficientPoints {
            method,
            required,
            found,
        }
    }

    /// Create a parse failure
    pub fn parse_failure(column: usize, message: impl Into<String>) -> Self {
        Self::ParseFailure {
            column,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
