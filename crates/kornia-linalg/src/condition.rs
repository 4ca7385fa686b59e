use crate::error::LinalgError;
use crate::matrix::{frobenius_norm, Matrix};
use crate::params::LinalgParams;
use crate::pinv::pseudoinverse_with_params;

/// Estimate the condition number of a matrix as `||A||_F * ||A+||_F`.
///
/// This bounds the spectral condition number from above and is cheaper than
/// a singular value decomposition. It grows without bound as `A` approaches
/// singularity.
///
/// # Errors
///
/// Propagates any error from [`crate::pseudoinverse`].
///
/// # Example
///
/// ```
/// use kornia_linalg::{condition_number, Matrix};
///
/// let a = Matrix::identity(3);
/// assert!((condition_number(&a).unwrap() - 3.0).abs() < 1e-12);
/// ```
pub fn condition_number(a: &Matrix) -> Result<f64, LinalgError> {
    condition_number_with_params(a, &LinalgParams::default())
}

/// Estimate the condition number of a matrix under an explicit tolerance policy.
pub fn condition_number_with_params(a: &Matrix, params: &LinalgParams) -> Result<f64, LinalgError> {
    let a_pinv = pseudoinverse_with_params(a, params)?;
    Ok(frobenius_norm(a) * frobenius_norm(&a_pinv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_tall() -> Result<(), LinalgError> {
        let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
        let cond = condition_number(&b)?;
        assert!(cond > 0.0 && cond < 1e4, "cond = {cond}");
        Ok(())
    }

    #[test]
    fn test_condition_grows_near_singularity() -> Result<(), LinalgError> {
        let mut last = 0.0;
        for eps in [1e-1, 1e-3, 1e-5] {
            let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0 + eps]])?;
            let cond = condition_number(&a)?;
            assert!(cond.is_finite());
            assert!(cond > last);
            last = cond;
        }
        assert!(last > 1e5);
        Ok(())
    }

    #[test]
    fn test_condition_singular() -> Result<(), LinalgError> {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]])?;
        assert!(matches!(
            condition_number(&a),
            Err(LinalgError::SingularMatrix(_))
        ));
        Ok(())
    }

    #[test]
    fn test_condition_empty() -> Result<(), LinalgError> {
        assert_eq!(condition_number(&Matrix::empty())?, 0.0);
        Ok(())
    }
}
