use thiserror::Error;

/// An error type for the dense linear algebra kernels.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The operand shapes are incompatible for the requested operation.
    #[error("Dimension mismatch: expected {0}, got {1}")]
    DimensionMismatch(usize, usize),

    /// Inversion was requested on a matrix that is not square.
    #[error("Matrix must be square to be inverted, got {0}x{1}")]
    NonSquareMatrix(usize, usize),

    /// A pivot fell below the tolerance during Gauss-Jordan elimination.
    #[error("Matrix is singular: no usable pivot in column {0}")]
    SingularMatrix(usize),

    /// A diagonal entry of the triangular factor fell below the tolerance.
    #[error("Triangular system is singular: vanishing diagonal at row {0}")]
    SingularSystem(usize),

    /// The operation requires a matrix with positive dimensions.
    #[error("Empty input: the operation requires a matrix with positive dimensions")]
    EmptyInput,

    /// The data length does not match the requested shape.
    #[error("Data length ({0}) does not match the matrix size ({1})")]
    InvalidShape(usize, usize),

    /// A row does not have the same length as the first row.
    #[error("Row {0} has length {1}, expected {2}")]
    RaggedRows(usize, usize, usize),

    /// A numerical parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
