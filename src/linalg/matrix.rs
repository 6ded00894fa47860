//! Dense row-major matrix and the `(A, b)` system pair.

use std::fmt;

use crate::error::{NumkitError, Result};

/// Dense matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build a matrix from a list of rows.
    ///
    /// Fails with [`NumkitError::DimensionMismatch`] if the rows are ragged.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(NumkitError::dimension_mismatch(
                    format!("matrix row {}", i),
                    cols,
                    row.len(),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Build a matrix from row-major data.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NumkitError::dimension_mismatch(
                "matrix data",
                rows * cols,
                data.len(),
            ));
        }
        Ok(Self {
            data: data.to_vec(),
            rows,
            cols,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix is square and non-empty.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols && self.rows > 0
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Add to element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] += value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Matrix-vector product `A * x`.
    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.cols {
            return Err(NumkitError::dimension_mismatch(
                "matrix-vector product",
                self.cols,
                x.len(),
            ));
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(x).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Check strict row diagonal dominance: `|a_ii| > sum_{j != i} |a_ij|` for every row.
    ///
    /// Sufficient (not necessary) for Gauss-Seidel convergence.
    pub fn is_diagonally_dominant(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.rows).all(|i| {
            let off: f64 = self
                .row(i)
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, v)| v.abs())
                .sum();
            self.get(i, i).abs() > off
        })
    }

    /// Fail unless the matrix is square and non-empty.
    pub(crate) fn ensure_square(&self, context: &str) -> Result<usize> {
        if self.rows == 0 {
            return Err(NumkitError::dimension_mismatch(context, 1, 0));
        }
        if self.rows != self.cols {
            return Err(NumkitError::dimension_mismatch(
                format!("{} (square matrix)", context),
                self.rows,
                self.cols,
            ));
        }
        Ok(self.rows)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>10.4}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// A linear system `Ax = b` with consistent shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// Coefficient matrix
    pub a: Matrix,
    /// Right-hand side
    pub b: Vec<f64>,
}

impl LinearSystem {
    /// Pair a matrix with a right-hand side, checking `len(b) == rows(a)`.
    pub fn new(a: Matrix, b: Vec<f64>) -> Result<Self> {
        if b.len() != a.rows() {
            return Err(NumkitError::dimension_mismatch(
                "right-hand side",
                a.rows(),
                b.len(),
            ));
        }
        Ok(Self { a, b })
    }

    /// Number of equations.
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// Solve directly with LU decomposition.
    pub fn solve(&self) -> Result<Vec<f64>> {
        super::solve(&self.a, &self.b)
    }
}

/// Running maximum for norms; a NaN operand makes the result NaN.
pub(crate) fn nan_max(acc: f64, value: f64) -> f64 {
    if value.is_nan() || value > acc {
        value
    } else {
        acc
    }
}

/// Infinity norm of the residual `A x - b`.
///
/// NaN if any component of the residual is NaN.
pub fn residual_norm(a: &Matrix, x: &[f64], b: &[f64]) -> Result<f64> {
    let ax = a.mul_vec(x)?;
    if ax.len() != b.len() {
        return Err(NumkitError::dimension_mismatch("residual", ax.len(), b.len()));
    }
    Ok(ax
        .iter()
        .zip(b)
        .fold(0.0f64, |acc, (l, r)| nan_max(acc, (l - r).abs())))
}
