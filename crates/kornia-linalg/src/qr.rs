use crate::error::LinalgError;
use crate::matrix::{identity, matmul, norm2, transpose, Matrix};
use crate::params::LinalgParams;

/// The factors of a QR decomposition `A = Q * R`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    /// The `m x m` orthogonal factor.
    pub q: Matrix,
    /// The `m x n` upper triangular factor. Entries strictly below the diagonal are exactly zero.
    pub r: Matrix,
}

impl QrDecomposition {
    /// Multiply the factors back together.
    pub fn reconstruct(&self) -> Result<Matrix, LinalgError> {
        matmul(&self.q, &self.r)
    }

    /// Split into `(Q, R)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.q, self.r)
    }
}

/// Compute the QR decomposition of an `m x n` matrix with Householder reflections.
///
/// Uses the default tolerance policy, see [`qr_decompose_with_params`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{qr_decompose, Matrix};
///
/// let a = Matrix::from_rows(&[[12.0, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]]).unwrap();
/// let qr = qr_decompose(&a).unwrap();
/// let recon = qr.reconstruct().unwrap();
/// for (x, y) in recon.as_slice().iter().zip(a.as_slice()) {
///     assert!((x - y).abs() < 1e-9);
/// }
/// ```
pub fn qr_decompose(a: &Matrix) -> Result<QrDecomposition, LinalgError> {
    qr_decompose_with_params(a, &LinalgParams::default())
}

/// Compute the QR decomposition of an `m x n` matrix with Householder reflections.
///
/// For each column `c < min(m, n)` the sub-column `x = R[c.., c]` is reflected
/// onto a multiple of `e1` with `H = I - 2 v v^T`, where
/// `v = x + sign(x0) ||x|| e1` normalized. Columns whose sub-column has zero
/// norm, or whose reflector degenerates to zero, are left untouched.
///
/// # Arguments
///
/// * `a` - The matrix to factorize. It is copied, never modified.
/// * `params` - Tolerance policy; only used to report unusually large sub-diagonal residue.
///
/// # Errors
///
/// Returns [`LinalgError::EmptyInput`] if `a` has zero rows or zero columns.
pub fn qr_decompose_with_params(
    a: &Matrix,
    params: &LinalgParams,
) -> Result<QrDecomposition, LinalgError> {
    params.validate()?;

    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(LinalgError::EmptyInput);
    }

    let mut r = a.clone();
    // accumulates H_k ... H_1, transposed at the end
    let mut qt = identity(m);

    for c in 0..m.min(n) {
        let Some(v) = householder_vector(&r, c) else {
            continue;
        };
        apply_reflector(&mut r, &v, c, c);
        apply_reflector(&mut qt, &v, c, 0);
    }

    for i in 1..m {
        for j in 0..i.min(n) {
            let residue = r[(i, j)];
            if residue.abs() > params.zero_tolerance {
                log::trace!("Clearing sub-diagonal residue {residue:e} at ({i}, {j})");
            }
            r[(i, j)] = 0.0;
        }
    }

    Ok(QrDecomposition {
        q: transpose(&qt),
        r,
    })
}

/// Unit Householder vector that annihilates `r[c+1.., c]`, or `None` when no
/// reflection is needed.
fn householder_vector(r: &Matrix, c: usize) -> Option<Vec<f64>> {
    let mut v: Vec<f64> = (c..r.rows()).map(|i| r[(i, c)]).collect();

    let norm_x = norm2(&v);
    if norm_x == 0.0 {
        log::trace!("Column {c} is already zero below the diagonal");
        return None;
    }

    // same sign as the leading entry to avoid cancellation
    v[0] += if v[0] >= 0.0 { norm_x } else { -norm_x };

    let norm_v = norm2(&v);
    if norm_v == 0.0 {
        log::trace!("Degenerate reflector for column {c}");
        return None;
    }
    v.iter_mut().for_each(|x| *x /= norm_v);

    Some(v)
}

/// Apply `H = I - 2 v v^T` to rows `start..start + v.len()` of `mat`,
/// restricted to columns `first_col..`.
fn apply_reflector(mat: &mut Matrix, v: &[f64], start: usize, first_col: usize) {
    for j in first_col..mat.cols() {
        let proj = 2.0
            * v.iter()
                .enumerate()
                .map(|(k, vk)| vk * mat[(start + k, j)])
                .sum::<f64>();
        if proj == 0.0 {
            continue;
        }
        for (k, vk) in v.iter().enumerate() {
            mat[(start + k, j)] -= proj * vk;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_matrix_eq(a: &Matrix, b: &Matrix, eps: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = eps);
        }
    }

    fn check_factorization(a: &Matrix) -> Result<QrDecomposition, LinalgError> {
        let qr = qr_decompose(a)?;
        let (m, n) = a.shape();
        assert_eq!(qr.q.shape(), (m, m));
        assert_eq!(qr.r.shape(), (m, n));

        assert_matrix_eq(&qr.reconstruct()?, a, 1e-6);
        assert_matrix_eq(&matmul(&transpose(&qr.q), &qr.q)?, &identity(m), 1e-6);

        for i in 0..m {
            for j in 0..i.min(n) {
                assert_eq!(qr.r[(i, j)], 0.0);
            }
        }
        Ok(qr)
    }

    #[test]
    fn test_qr_square() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[
            [12.0, -51.0, 4.0],
            [6.0, 167.0, -68.0],
            [-4.0, 24.0, -41.0],
        ])?;
        let qr = check_factorization(&a)?;
        // |R| diagonal of the textbook example
        assert_abs_diff_eq!(qr.r[(0, 0)].abs(), 14.0, epsilon = 1e-9);
        assert_abs_diff_eq!(qr.r[(1, 1)].abs(), 175.0, epsilon = 1e-9);
        assert_abs_diff_eq!(qr.r[(2, 2)].abs(), 35.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_qr_tall() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]])?;
        check_factorization(&a)?;
        Ok(())
    }

    #[test]
    fn test_qr_wide() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0, 4.0], [2.0, -1.0, 0.5, 3.0]])?;
        check_factorization(&a)?;
        Ok(())
    }

    #[test]
    fn test_qr_zero_column_is_skipped() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[0.0, 1.0], [0.0, 2.0], [0.0, 3.0]])?;
        let qr = check_factorization(&a)?;
        assert_eq!(qr.r[(0, 0)], 0.0);
        Ok(())
    }

    #[test]
    fn test_qr_zero_matrix() -> Result<(), LinalgError> {
        let a = Matrix::zeros(3, 2);
        let qr = check_factorization(&a)?;
        assert_eq!(qr.q, identity(3));
        assert_eq!(qr.r, a);
        Ok(())
    }

    #[test]
    fn test_qr_single_element() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[-3.0]])?;
        let qr = check_factorization(&a)?;
        assert_abs_diff_eq!(qr.r[(0, 0)].abs(), 3.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_qr_large_magnitude() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1e200, 1.0], [1e200, 2.0]])?;
        let qr = qr_decompose(&a)?;
        assert!(qr.q.as_slice().iter().all(|v| v.is_finite()));
        assert!(qr.r.as_slice().iter().all(|v| v.is_finite()));

        let recon = qr.reconstruct()?;
        assert_relative_eq!(recon[(0, 0)], 1e200, max_relative = 1e-12);
        assert_relative_eq!(recon[(1, 0)], 1e200, max_relative = 1e-12);
        assert_abs_diff_eq!(recon[(0, 1)], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(recon[(1, 1)], 2.0, epsilon = 1e-9);
        assert_matrix_eq(&matmul(&transpose(&qr.q), &qr.q)?, &identity(2), 1e-12);
        Ok(())
    }

    #[test]
    fn test_qr_empty() {
        assert_eq!(qr_decompose(&Matrix::empty()), Err(LinalgError::EmptyInput));
        assert_eq!(qr_decompose(&Matrix::zeros(3, 0)), Err(LinalgError::EmptyInput));
    }

    #[test]
    fn test_qr_leaves_input_untouched() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]])?;
        let copy = a.clone();
        let (q, r) = qr_decompose(&a)?.into_parts();
        assert_eq!(a, copy);
        assert_eq!(q.shape(), (2, 2));
        assert_eq!(r.shape(), (2, 2));
        Ok(())
    }
}
