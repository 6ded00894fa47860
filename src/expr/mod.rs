//! Function evaluation for sampled-function quadrature.
//!
//! The quadrature pipeline only sees the [`FunctionEvaluator`] trait: given a
//! textual expression and a grid, return the function values on that grid.
//! [`ExpressionEvaluator`] is the built-in implementation, backed by a small
//! arithmetic expression language in the single variable `x`.
//!
//! # Grammar Overview
//!
//! ```text
//! sum      = product { ('+' | '-') product }
//! product  = unary { ('*' | '/') unary }
//! unary    = ('+' | '-') unary | power
//! power    = primary [ ('^' | '**') unary ]
//! primary  = number | identifier [ '(' sum ')' ] | '(' sum ')'
//!
//! number   = digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! ```
//!
//! Power is right-associative and binds tighter than unary minus, so
//! `-x**2` is `-(x**2)`. Nesting beyond [`MAX_DEPTH`] levels is a parse error.
//!
//! | Name | Meaning |
//! |------|---------|
//! | `x` | the sampled variable |
//! | `pi`, `e` | constants |
//! | `sin cos tan asin acos atan` | trigonometric functions |
//! | `sinh cosh tanh` | hyperbolic functions |
//! | `exp log ln log10 sqrt abs` | other functions (`log` is natural) |
//!
//! # Example
//!
//! ```
//! use numkit_core::expr::{ExpressionEvaluator, FunctionEvaluator};
//!
//! let y = ExpressionEvaluator.evaluate("x**2 + 1", &[0.0, 1.0, 2.0]).unwrap();
//! assert_eq!(y, vec![1.0, 2.0, 5.0]);
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, Function, UnaryOp, VARIABLE};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{Parser, MAX_DEPTH};

use crate::error::Result;

/// Turns a textual function and a grid into function values.
///
/// Implementations report unparsable text as
/// [`NumkitError::ParseFailure`](crate::error::NumkitError::ParseFailure)
/// and evaluation problems as
/// [`NumkitError::EvaluationFailure`](crate::error::NumkitError::EvaluationFailure).
/// Non-finite values are returned as-is; the caller validates them.
pub trait FunctionEvaluator {
    /// Evaluate `expression` at every point.
    fn evaluate(&self, expression: &str, points: &[f64]) -> Result<Vec<f64>>;
}

/// Evaluator for the built-in expression language.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEvaluator;

impl FunctionEvaluator for ExpressionEvaluator {
    fn evaluate(&self, expression: &str, points: &[f64]) -> Result<Vec<f64>> {
        let expr = parse(expression)?;
        points.iter().map(|&x| expr.eval(x)).collect()
    }
}

/// Parse an expression string into an AST.
pub fn parse(input: &str) -> Result<Expr> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}
