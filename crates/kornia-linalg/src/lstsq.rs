use crate::condition::condition_number_with_params;
use crate::error::LinalgError;
use crate::inverse::inverse_with_params;
use crate::matrix::{frobenius_norm, matmul, matvec, transpose, Matrix};
use crate::params::LinalgParams;
use crate::qr::{qr_decompose_with_params, QrDecomposition};

/// Solve `A x = b` given the QR factors of `A`.
///
/// Uses the default tolerance policy, see [`solve_qr_with_params`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{qr_decompose, solve_qr, Matrix};
///
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
/// let qr = qr_decompose(&a).unwrap();
/// let x = solve_qr(&qr.q, &qr.r, &[3.0, 5.0]).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-9);
/// assert!((x[1] - 1.4).abs() < 1e-9);
/// ```
pub fn solve_qr(q: &Matrix, r: &Matrix, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    solve_qr_with_params(q, r, b, &LinalgParams::default())
}

/// Solve `A x = b` given the QR factors of `A`.
///
/// Computes `y = Q^T b` and resolves `R x = y` by back-substitution over the
/// first `n` rows of `R`. When `m > n` this is the least-squares solution.
///
/// # Arguments
///
/// * `q` - The `m x m` orthogonal factor.
/// * `r` - The `m x n` upper triangular factor, with `m >= n`.
/// * `b` - The right-hand side of length `m`.
/// * `params` - Tolerance policy; `pivot_tolerance` is the smallest accepted diagonal magnitude.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `b.len() != m`, if the factor
///   shapes disagree, or if `R` has more columns than rows.
/// * [`LinalgError::SingularSystem`] if a diagonal entry of `R` is below the tolerance.
pub fn solve_qr_with_params(
    q: &Matrix,
    r: &Matrix,
    b: &[f64],
    params: &LinalgParams,
) -> Result<Vec<f64>, LinalgError> {
    params.validate()?;

    let m = q.rows();
    if b.len() != m {
        return Err(LinalgError::DimensionMismatch(m, b.len()));
    }
    if q.cols() != m {
        return Err(LinalgError::DimensionMismatch(m, q.cols()));
    }
    if r.rows() != m {
        return Err(LinalgError::DimensionMismatch(m, r.rows()));
    }
    let n = r.cols();
    if n > m {
        return Err(LinalgError::DimensionMismatch(m, n));
    }

    // y = Q^T b
    let y = matvec(&transpose(q), b)?;

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let row = r.row(i);
        let sum: f64 = row[i + 1..]
            .iter()
            .zip(&x[i + 1..])
            .map(|(r_ij, x_j)| r_ij * x_j)
            .sum();
        let diag = row[i];
        if diag.abs() < params.pivot_tolerance {
            log::debug!("Diagonal {diag:e} of R at row {i} is below tolerance");
            return Err(LinalgError::SingularSystem(i));
        }
        x[i] = (y[i] - sum) / diag;
    }

    Ok(x)
}

/// Least-squares solution of `A x = b` through a Householder QR factorization.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if `b.len() != A.rows()` or `A` has more columns than rows.
/// * [`LinalgError::EmptyInput`] if `A` is empty.
/// * [`LinalgError::SingularSystem`] if `A` does not have full column rank.
pub fn lstsq_qr(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
    lstsq_qr_with_params(a, b, &LinalgParams::default())
}

/// Least-squares solution of `A x = b` through QR under an explicit tolerance policy.
pub fn lstsq_qr_with_params(
    a: &Matrix,
    b: &[f64],
    params: &LinalgParams,
) -> Result<Vec<f64>, LinalgError> {
    let (x, _) = factor_and_solve(a, b, params)?;
    Ok(x)
}

fn factor_and_solve(
    a: &Matrix,
    b: &[f64],
    params: &LinalgParams,
) -> Result<(Vec<f64>, QrDecomposition), LinalgError> {
    if b.len() != a.rows() {
        return Err(LinalgError::DimensionMismatch(a.rows(), b.len()));
    }
    if a.cols() > a.rows() {
        return Err(LinalgError::DimensionMismatch(a.rows(), a.cols()));
    }
    let qr = qr_decompose_with_params(a, params)?;
    let x = solve_qr_with_params(&qr.q, &qr.r, b, params)?;
    Ok((x, qr))
}

/// Solve the regularized normal equations `(A^T A + lambda I) x = A^T b`.
///
/// `lambda = 0` gives the classic normal equations, `lambda > 0` gives ridge
/// regression.
///
/// # Returns
///
/// The solution `x` and the Frobenius condition estimate of `A^T A + lambda I`.
///
/// # Errors
///
/// * [`LinalgError::InvalidParameter`] if `lambda` is negative or not finite.
/// * [`LinalgError::DimensionMismatch`] if `b.len() != A.rows()`.
/// * [`LinalgError::SingularMatrix`] if the regularized normal matrix is singular.
pub fn normal_equations(a: &Matrix, b: &[f64], lambda: f64) -> Result<(Vec<f64>, f64), LinalgError> {
    normal_equations_with_params(a, b, lambda, &LinalgParams::default())
}

/// Solve the regularized normal equations under an explicit tolerance policy.
///
/// `params.pivot_tolerance` bounds the pivots accepted when inverting `A^T A + lambda I`.
pub fn normal_equations_with_params(
    a: &Matrix,
    b: &[f64],
    lambda: f64,
    params: &LinalgParams,
) -> Result<(Vec<f64>, f64), LinalgError> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(LinalgError::InvalidParameter(format!(
            "regularization must be finite and non-negative, got {lambda}"
        )));
    }

    let at = transpose(a);
    let atb = matvec(&at, b)?;

    let mut ata = matmul(&at, a)?;
    if lambda != 0.0 {
        let n = ata.rows();
        for i in 0..n {
            ata[(i, i)] += lambda;
        }
    }

    let ata_inv = inverse_with_params(&ata, params)?;
    let x = matvec(&ata_inv, &atb)?;

    // the normal matrix is square and invertible here, so its pseudoinverse is ata_inv
    let cond = frobenius_norm(&ata) * frobenius_norm(&ata_inv);

    Ok((x, cond))
}

/// Mean squared residual `(1/m) ||A x - b||^2`. Returns `0.0` when `m = 0`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `x.len() != A.cols()` or `b.len() != A.rows()`.
pub fn mean_squared_error(a: &Matrix, x: &[f64], b: &[f64]) -> Result<f64, LinalgError> {
    if b.len() != a.rows() {
        return Err(LinalgError::DimensionMismatch(a.rows(), b.len()));
    }
    let ax = matvec(a, x)?;
    if ax.is_empty() {
        return Ok(0.0);
    }
    let sq: f64 = ax.iter().zip(b).map(|(p, o)| (p - o) * (p - o)).sum();
    Ok(sq / ax.len() as f64)
}

/// Polynomial design matrix with one row per sample and columns `x^0, ..., x^degree`.
pub fn design_matrix(xs: &[f64], degree: usize) -> Matrix {
    let mut a = Matrix::zeros(xs.len(), degree + 1);
    for (i, &x) in xs.iter().enumerate() {
        let mut p = 1.0;
        for v in a.row_mut(i) {
            *v = p;
            p *= x;
        }
    }
    a
}

/// Least-squares strategies available through [`solve_least_squares`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeastSquaresMethod {
    /// `(A^T A)^-1 A^T b` with Gauss-Jordan inversion.
    NormalEquations,
    /// Householder QR followed by back-substitution.
    Qr,
    /// Normal equations with Tikhonov regularization `alpha >= 0`.
    Ridge(f64),
}

/// Output of [`solve_least_squares`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresResult {
    /// The coefficients `x` minimizing `||A x - b||`.
    pub solution: Vec<f64>,
    /// Frobenius condition estimate of the system actually solved
    /// (the normal matrix, or `R` for the QR method).
    pub condition: f64,
    /// Mean squared residual of the fit.
    pub mse: f64,
}

/// Dispatch a least-squares solve to the chosen method.
///
/// # Example
///
/// ```
/// use kornia_linalg::{design_matrix, solve_least_squares, LeastSquaresMethod};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
/// let a = design_matrix(&xs, 1);
/// let fit = solve_least_squares(&a, &ys, LeastSquaresMethod::Qr).unwrap();
/// assert!((fit.solution[0] - 1.0).abs() < 1e-9);
/// assert!((fit.solution[1] - 2.0).abs() < 1e-9);
/// assert!(fit.mse < 1e-18);
/// ```
pub fn solve_least_squares(
    a: &Matrix,
    b: &[f64],
    method: LeastSquaresMethod,
) -> Result<LeastSquaresResult, LinalgError> {
    solve_least_squares_with_params(a, b, method, &LinalgParams::default())
}

/// Dispatch a least-squares solve to the chosen method under an explicit tolerance policy.
pub fn solve_least_squares_with_params(
    a: &Matrix,
    b: &[f64],
    method: LeastSquaresMethod,
    params: &LinalgParams,
) -> Result<LeastSquaresResult, LinalgError> {
    let (solution, condition) = match method {
        LeastSquaresMethod::NormalEquations => normal_equations_with_params(a, b, 0.0, params)?,
        LeastSquaresMethod::Ridge(alpha) => normal_equations_with_params(a, b, alpha, params)?,
        LeastSquaresMethod::Qr => {
            let (x, qr) = factor_and_solve(a, b, params)?;
            (x, condition_number_with_params(&qr.r, params)?)
        }
    };
    let mse = mean_squared_error(a, &solution, b)?;

    Ok(LeastSquaresResult {
        solution,
        condition,
        mse,
    })
}
