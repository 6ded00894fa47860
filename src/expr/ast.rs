//! Abstract Syntax Tree types for the expression language.

use std::fmt;

use crate::error::{NumkitError, Result};

/// Name of the free variable bound during evaluation.
pub const VARIABLE: &str = "x";

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or named constant
    Number(f64),
    /// Named variable
    Variable(String),
    /// Prefix operation
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Infix operation
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Single-argument function call
    Call { function: Function, arg: Box<Expr> },
}

impl Expr {
    /// Evaluate with the variable `x` bound to `x`.
    ///
    /// Arithmetic follows IEEE-754 (`1/0` is infinite, `log(-1)` is NaN);
    /// only an unbound variable is an error.
    pub fn eval(&self, x: f64) -> Result<f64> {
        Ok(match self {
            Expr::Number(v) => *v,
            Expr::Variable(name) if name == VARIABLE => x,
            Expr::Variable(name) => {
                return Err(NumkitError::EvaluationFailure {
                    message: format!("unbound variable '{}' (only '{}' is defined)", name, VARIABLE),
                });
            }
            Expr::Unary { op, operand } => {
                let v = operand.eval(x)?;
                match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Minus => -v,
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.eval(x)?, rhs.eval(x)?);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                }
            }
            Expr::Call { function, arg } => function.apply(arg.eval(x)?),
        })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(v) => write!(f, "{}", v),
            Expr::Variable(name) => f.write_str(name),
            Expr::Unary { op, operand } => write!(f, "({}{})", op.symbol(), operand),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call { function, arg } => write!(f, "{}({})", function.name(), arg),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

impl UnaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm (`log` and `ln`)
    Ln,
    Log10,
    Sqrt,
    Abs,
}

impl Function {
    /// Look up a function by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_lowercase().as_str() {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "exp" => Function::Exp,
            "log" | "ln" => Function::Ln,
            "log10" => Function::Log10,
            "sqrt" => Function::Sqrt,
            "abs" => Function::Abs,
            _ => return None,
        })
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "log",
            Function::Log10 => "log10",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
        }
    }

    /// Apply the function.
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Function::Sin => v.sin(),
            Function::Cos => v.cos(),
            Function::Tan => v.tan(),
            Function::Asin => v.asin(),
            Function::Acos => v.acos(),
            Function::Atan => v.atan(),
            Function::Sinh => v.sinh(),
            Function::Cosh => v.cosh(),
            Function::Tanh => v.tanh(),
            Function::Exp => v.exp(),
            Function::Ln => v.ln(),
            Function::Log10 => v.log10(),
            Function::Sqrt => v.sqrt(),
            Function::Abs => v.abs(),
        }
    }
}

/// Look up a named constant.
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(std::f64::consts::PI),
        "e" | "E" => Some(std::f64::consts::E),
        _ => None,
    }
}
