use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::params::LinalgParams;

/// Invert a square matrix using Gauss-Jordan elimination with partial pivoting.
///
/// Uses the default tolerance policy, see [`inverse_with_params`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{inverse, Matrix};
///
/// let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
/// let inv = inverse(&a).unwrap();
/// assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
/// assert!((inv[(1, 1)] - 0.4).abs() < 1e-12);
/// ```
pub fn inverse(a: &Matrix) -> Result<Matrix, LinalgError> {
    inverse_with_params(a, &LinalgParams::default())
}

/// Invert a square matrix using Gauss-Jordan elimination with partial pivoting.
///
/// The augmented matrix `[A | I]` is reduced column by column. For each
/// column the row with the largest absolute value at or below the diagonal
/// is chosen as pivot; ties keep the lowest row index.
///
/// # Arguments
///
/// * `a` - The `n x n` matrix to invert. It is copied, never modified.
/// * `params` - Tolerance policy; `pivot_tolerance` is the smallest accepted pivot magnitude.
///
/// # Errors
///
/// * [`LinalgError::NonSquareMatrix`] if `a` is not square.
/// * [`LinalgError::EmptyInput`] if `a` is `0x0`.
/// * [`LinalgError::SingularMatrix`] if a pivot magnitude falls below the tolerance.
pub fn inverse_with_params(a: &Matrix, params: &LinalgParams) -> Result<Matrix, LinalgError> {
    params.validate()?;

    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LinalgError::NonSquareMatrix(rows, cols));
    }
    let n = rows;
    if n == 0 {
        return Err(LinalgError::EmptyInput);
    }

    // augmented matrix [A | I]
    let mut aug = Matrix::zeros(n, 2 * n);
    for i in 0..n {
        let row = aug.row_mut(i);
        row[..n].copy_from_slice(a.row(i));
        row[n + i] = 1.0;
    }

    for i in 0..n {
        let pivot = select_pivot(&aug, i);
        let pivot_val = aug[(pivot, i)];
        if pivot_val.abs() < params.pivot_tolerance {
            log::debug!(
                "Pivot {:e} in column {} is below tolerance {:e}",
                pivot_val,
                i,
                params.pivot_tolerance
            );
            return Err(LinalgError::SingularMatrix(i));
        }
        aug.swap_rows(pivot, i);

        aug.row_mut(i).iter_mut().for_each(|v| *v /= pivot_val);

        let pivot_row = aug.row(i).to_vec();
        for r in 0..n {
            if r == i {
                continue;
            }
            let factor = aug[(r, i)];
            if factor == 0.0 {
                continue;
            }
            for (v, p) in aug.row_mut(r).iter_mut().zip(&pivot_row) {
                *v -= factor * p;
            }
        }
    }

    let mut inv = Matrix::zeros(n, n);
    for i in 0..n {
        inv.row_mut(i).copy_from_slice(&aug.row(i)[n..]);
    }

    Ok(inv)
}

/// Row index in `[col, rows)` with the largest magnitude in column `col`.
/// Only a strictly larger magnitude replaces the current candidate.
fn select_pivot(aug: &Matrix, col: usize) -> usize {
    let mut pivot = col;
    for r in col + 1..aug.rows() {
        if aug[(r, col)].abs() > aug[(pivot, col)].abs() {
            pivot = r;
        }
    }
    pivot
}
