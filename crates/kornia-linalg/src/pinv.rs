use crate::error::LinalgError;
use crate::inverse::inverse_with_params;
use crate::matrix::{matmul, transpose, Matrix};
use crate::params::LinalgParams;

/// Compute the Moore-Penrose pseudoinverse of a matrix.
///
/// Uses the default tolerance policy, see [`pseudoinverse_with_params`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{matmul, pseudoinverse, Matrix};
///
/// let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
/// let b_pinv = pseudoinverse(&b).unwrap();
/// assert_eq!(b_pinv.shape(), (2, 3));
///
/// let recon = matmul(&matmul(&b, &b_pinv).unwrap(), &b).unwrap();
/// for (x, y) in recon.as_slice().iter().zip(b.as_slice()) {
///     assert!((x - y).abs() < 1e-5);
/// }
/// ```
pub fn pseudoinverse(a: &Matrix) -> Result<Matrix, LinalgError> {
    pseudoinverse_with_params(a, &LinalgParams::default())
}

/// Compute the Moore-Penrose pseudoinverse of a matrix from the normal equations.
///
/// The formula is chosen from the shape alone:
///
/// * `rows >= cols`: `A+ = (A^T A)^-1 A^T`, assuming full column rank.
/// * `rows < cols`: `A+ = A^T (A A^T)^-1`, assuming full row rank.
///
/// The rank is not verified. A rank-deficient matrix whose normal matrix is
/// still numerically invertible yields a wrong result without an error.
///
/// A matrix with zero rows or zero columns yields an empty `0x0` matrix.
///
/// # Errors
///
/// Returns [`LinalgError::SingularMatrix`] if the normal matrix cannot be inverted.
pub fn pseudoinverse_with_params(
    a: &Matrix,
    params: &LinalgParams,
) -> Result<Matrix, LinalgError> {
    if a.is_empty() {
        return Ok(Matrix::empty());
    }

    let at = transpose(a);
    if a.rows() >= a.cols() {
        log::debug!("Pseudoinverse of {}x{} via (A^T A)^-1 A^T", a.rows(), a.cols());
        let ata_inv = inverse_with_params(&matmul(&at, a)?, params)?;
        matmul(&ata_inv, &at)
    } else {
        log::debug!("Pseudoinverse of {}x{} via A^T (A A^T)^-1", a.rows(), a.cols());
        let aat_inv = inverse_with_params(&matmul(a, &at)?, params)?;
        matmul(&at, &aat_inv)
    }
}
