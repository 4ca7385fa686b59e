#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `kornia-linalg` provides dense linear algebra kernels for small `f64`
//! matrices: Gauss-Jordan inversion, Householder QR, least squares,
//! the Moore-Penrose pseudoinverse and a Frobenius condition estimate.
//!
//! Every operation takes its inputs by reference and returns a fresh result
//! or a [`LinalgError`]; no state is shared between calls.
//!
//! # Example
//!
//! ```rust
//! use kornia_linalg::{inverse, matmul, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]])?;
//! let a_inv = inverse(&a)?;
//! let eye = matmul(&a, &a_inv)?;
//! assert!((eye[(0, 0)] - 1.0).abs() < 1e-12);
//! assert!(eye[(0, 1)].abs() < 1e-12);
//! # Ok::<(), kornia_linalg::LinalgError>(())
//! ```

/// Frobenius-norm condition number estimate.
pub mod condition;

/// Error types for the linear algebra kernels.
pub mod error;

/// Gauss-Jordan matrix inversion with partial pivoting.
pub mod inverse;

/// Least-squares solvers built on QR and the normal equations.
pub mod lstsq;

/// Dense row-major matrix type and elementary operations.
pub mod matrix;

/// Tolerance policy shared by the kernels.
pub mod params;

/// Moore-Penrose pseudoinverse.
pub mod pinv;

/// Householder QR decomposition.
pub mod qr;

pub use condition::{condition_number, condition_number_with_params};
pub use error::LinalgError;
pub use inverse::{inverse, inverse_with_params};
pub use lstsq::{
    design_matrix, lstsq_qr, lstsq_qr_with_params, mean_squared_error, normal_equations,
    normal_equations_with_params, solve_least_squares, solve_least_squares_with_params, solve_qr,
    solve_qr_with_params, LeastSquaresMethod, LeastSquaresResult,
};
pub use matrix::{dot, frobenius_norm, identity, matmul, matvec, norm2, transpose, Matrix};
pub use params::LinalgParams;
pub use pinv::{pseudoinverse, pseudoinverse_with_params};
pub use qr::{qr_decompose, qr_decompose_with_params, QrDecomposition};
