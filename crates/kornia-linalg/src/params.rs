use crate::error::LinalgError;

/// Magnitude below which pivots and triangular diagonals are treated as zero.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Magnitude of sub-diagonal residue expected after a Householder sweep.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-12;

/// Numerical tolerances shared by the elimination and factorization kernels.
///
/// Every operation in this crate has a default entry point that uses
/// [`LinalgParams::default`] and a `*_with_params` variant that accepts an
/// explicit policy, so results can be reproduced under a known tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinalgParams {
    /// Pivots (Gauss-Jordan) and diagonal entries of R (back-substitution)
    /// with a magnitude strictly below this value are rejected as singular.
    pub pivot_tolerance: f64,
    /// Sub-diagonal entries of R larger than this after factorization are
    /// reported in the trace log before being cleared.
    pub zero_tolerance: f64,
}

impl Default for LinalgParams {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }
}

impl LinalgParams {
    /// Check that both tolerances are finite and non-negative.
    pub fn validate(&self) -> Result<(), LinalgError> {
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(LinalgError::InvalidParameter(format!(
                "pivot_tolerance must be finite and non-negative, got {}",
                self.pivot_tolerance
            )));
        }
        if !self.zero_tolerance.is_finite() || self.zero_tolerance < 0.0 {
            return Err(LinalgError::InvalidParameter(format!(
                "zero_tolerance must be finite and non-negative, got {}",
                self.zero_tolerance
            )));
        }
        Ok(())
    }
}
