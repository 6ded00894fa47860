//! LU decomposition with partial pivoting.

use crate::error::{NumkitError, Result};

use super::matrix::Matrix;
use super::PIVOT_TOLERANCE;

/// LU factors of a square matrix, `PA = LU`.
///
/// `L` (unit lower triangular, diagonal implied) and `U` share one
/// row-major buffer.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Packed L and U factors
    lu: Vec<f64>,
    /// Row permutation: row `i` of `PA` is row `pivots[i]` of `A`
    pivots: Vec<usize>,
    /// Matrix dimension
    size: usize,
}

impl LuDecomposition {
    /// Factor `a` using Gaussian elimination with partial pivoting.
    pub fn factor(a: &Matrix) -> Result<Self> {
        let n = a.ensure_square("LU factorization")?;
        let mut lu = a.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();

        // Largest entry of each original row; a pivot is judged against its own row
        let row_scale: Vec<f64> = (0..n)
            .map(|i| a.row(i).iter().fold(0.0f64, |acc, v| acc.max(v.abs())))
            .collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val == 0.0
                || !max_val.is_finite()
                || max_val <= PIVOT_TOLERANCE * row_scale[pivots[max_row]]
            {
                log::debug!("singular matrix: column {} has pivot {:.3e}", k, max_val);
                return Err(NumkitError::SingularMatrix);
            }

            // Swap rows if needed
            if max_row != k {
                log::trace!("pivot swap: row {} <-> row {}", k, max_row);
                pivots.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(Self { lu, pivots, size: n })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Solve `Ax = b` with the stored factors.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.size;
        if b.len() != n {
            return Err(NumkitError::dimension_mismatch("right-hand side", n, b.len()));
        }

        // Apply pivot permutation to b
        let mut x: Vec<f64> = self.pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        Ok(x)
    }

    /// Determinant of the factored matrix.
    pub fn determinant(&self) -> f64 {
        let n = self.size;
        let mut det: f64 = (0..n).map(|i| self.lu[i * n + i]).product();
        // Each transposition in the permutation flips the sign
        let mut seen = vec![false; n];
        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut len = 0;
            let mut i = start;
            while !seen[i] {
                seen[i] = true;
                i = self.pivots[i];
                len += 1;
            }
            if len % 2 == 0 {
                det = -det;
            }
        }
        det
    }
}

/// Solve `Ax = b` for a square, non-singular `A`.
///
/// Fails with [`NumkitError::DimensionMismatch`] when `A` is not square or
/// `b` has the wrong length, and with [`NumkitError::SingularMatrix`] when no
/// usable pivot exists.
pub fn solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    let n = a.ensure_square("direct solve")?;
    if b.len() != n {
        return Err(NumkitError::dimension_mismatch("right-hand side", n, b.len()));
    }
    LuDecomposition::factor(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::residual_norm;
    use approx::assert_abs_diff_eq;

    fn production() -> (Matrix, Vec<f64>) {
        let a = Matrix::from_rows(&[
            [15.0, 17.0, 19.0],
            [0.30, 0.40, 0.55],
            [1.0, 1.2, 1.5],
        ])
        .unwrap();
        (a, vec![3890.0, 95.0, 282.0])
    }

    #[test]
    fn test_solve_production_system() {
        let (a, b) = production();
        let x = solve(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[2], 80.0, epsilon = 1e-9);
        assert!(residual_norm(&a, &x, &b).unwrap() < 1e-9);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        let a = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let x = solve(&a, &[2.0, 3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_residual_small_for_larger_system() {
        let a = Matrix::from_rows(&[
            [4.0, -2.0, 1.0, 3.0],
            [3.0, 6.0, -4.0, 2.0],
            [2.0, 1.0, 8.0, -5.0],
            [1.0, 3.0, -2.0, 7.0],
        ])
        .unwrap();
        let b = [10.0, -4.0, 7.0, 1.5];
        let x = solve(&a, &b).unwrap();
        assert!(residual_norm(&a, &x, &b).unwrap() < 1e-9);
    }

    #[test]
    fn test_singular_matrix() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let err = solve(&a, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, NumkitError::SingularMatrix));

        let zero = Matrix::zeros(2, 2);
        assert!(matches!(
            solve(&zero, &[0.0, 0.0]),
            Err(NumkitError::SingularMatrix)
        ));
    }

    #[test]
    fn test_rows_of_different_scale() {
        let a = Matrix::from_rows(&[[1e13, 0.0], [0.0, 1.0]]).unwrap();
        let x = solve(&a, &[1e13, 1.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);

        let a = Matrix::from_rows(&[[1e-9, 2e-9], [3.0, 1.0]]).unwrap();
        let b = [5e-9, 5.0];
        let x = solve(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rounding_level_pivot_is_singular() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        assert!(matches!(
            solve(&a, &[1.0, 2.0, 3.0]),
            Err(NumkitError::SingularMatrix)
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let rect = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert!(matches!(
            solve(&rect, &[1.0, 2.0]),
            Err(NumkitError::DimensionMismatch { .. })
        ));

        let (a, _) = production();
        assert!(matches!(
            solve(&a, &[1.0, 2.0]),
            Err(NumkitError::DimensionMismatch { .. })
        ));

        let empty = Matrix::zeros(0, 0);
        assert!(solve(&empty, &[]).is_err());
    }

    #[test]
    fn test_factor_reuse_and_determinant() {
        let a = Matrix::from_rows(&[[0.0, 2.0], [3.0, 1.0]]).unwrap();
        let lu = LuDecomposition::factor(&a).unwrap();
        assert_abs_diff_eq!(lu.determinant(), -6.0, epsilon = 1e-12);

        let x1 = lu.solve(&[2.0, 4.0]).unwrap();
        let x2 = lu.solve(&[4.0, 8.0]).unwrap();
        assert_abs_diff_eq!(x2[0], 2.0 * x1[0], epsilon = 1e-12);
        assert_abs_diff_eq!(x2[1], 2.0 * x1[1], epsilon = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let (a, b) = production();
        let first = solve(&a, &b).unwrap();
        let second = solve(&a, &b).unwrap();
        assert_eq!(first, second);
    }
}
