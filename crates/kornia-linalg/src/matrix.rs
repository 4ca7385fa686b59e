use std::ops::{Index, IndexMut};

use crate::error::LinalgError;

/// A dense, row-major matrix of `f64` values.
///
/// The storage always holds exactly `rows * cols` elements, so every row has
/// the same length. Operations in this crate take matrices by reference and
/// work on owned copies, the input is never modified.
///
/// # Example
///
/// ```
/// use kornia_linalg::Matrix;
///
/// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(a.shape(), (2, 3));
/// assert_eq!(a[(1, 2)], 6.0);
/// assert_eq!(a.row(0), &[1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MatrixRepr", into = "MatrixRepr")
)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix of the given shape filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a `0x0` matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        identity(n)
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if `data.len() != rows * cols`.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        let numel = rows * cols;
        if data.len() != numel {
            return Err(LinalgError::InvalidShape(data.len(), numel));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from a list of rows.
    ///
    /// An empty list yields a `0x0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if a row differs in length from the first one.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::RaggedRows(i, row.len(), cols));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `(rows, cols)` pair.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Get the element at `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Borrow row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Mutably borrow row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Swap rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..(lo + 1) * cols].swap_with_slice(&mut tail[..cols]);
    }

    /// Iterate over the rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact panics on a zero chunk size
        (0..self.rows).map(move |i| self.row(i))
    }

    /// The row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix and return its row-major data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(|r| r.to_vec()).collect()
    }

    /// See [`transpose`].
    pub fn transpose(&self) -> Matrix {
        transpose(self)
    }

    /// See [`matmul`].
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        matmul(self, other)
    }

    /// See [`frobenius_norm`].
    pub fn frobenius_norm(&self) -> f64 {
        frobenius_norm(self)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(
            i < self.rows && j < self.cols,
            "Index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(
            i < self.rows && j < self.cols,
            "Index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixRepr> for Matrix {
    type Error = LinalgError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Matrix::from_shape_vec(repr.rows, repr.cols, repr.data)
    }
}

#[cfg(feature = "serde")]
impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

/// Create the `n x n` identity matrix. `n = 0` yields an empty matrix.
pub fn identity(n: usize) -> Matrix {
    let mut m = Matrix::zeros(n, n);
    for i in 0..n {
        m[(i, i)] = 1.0;
    }
    m
}

/// Transpose an `m x n` matrix into an `n x m` matrix.
pub fn transpose(a: &Matrix) -> Matrix {
    let mut t = Matrix::zeros(a.cols, a.rows);
    for (i, row) in a.row_iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            t[(j, i)] = v;
        }
    }
    t
}

/// Multiply an `m x k` matrix by a `k x n` matrix.
///
/// Zero entries of `a` are skipped in the accumulation loop.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `a.cols() != b.rows()`.
///
/// # Example
///
/// ```
/// use kornia_linalg::{matmul, Matrix};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(&[[5.0], [6.0]]).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[17.0, 39.0]);
/// ```
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.cols != b.rows {
        return Err(LinalgError::DimensionMismatch(a.cols, b.rows));
    }

    let mut c = Matrix::zeros(a.rows, b.cols);
    for i in 0..a.rows {
        for k in 0..a.cols {
            let a_ik = a[(i, k)];
            if a_ik == 0.0 {
                continue;
            }
            let b_row = b.row(k);
            for (c_ij, &b_kj) in c.row_mut(i).iter_mut().zip(b_row) {
                *c_ij += a_ik * b_kj;
            }
        }
    }

    Ok(c)
}

/// Multiply an `m x n` matrix by a vector of length `n`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `x.len() != a.cols()`.
pub fn matvec(a: &Matrix, x: &[f64]) -> Result<Vec<f64>, LinalgError> {
    if x.len() != a.cols {
        return Err(LinalgError::DimensionMismatch(a.cols, x.len()));
    }
    Ok(a.row_iter()
        .map(|row| row.iter().zip(x).map(|(r, v)| r * v).sum())
        .collect())
}

/// Inner product of two vectors of equal length.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the lengths differ.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, LinalgError> {
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y))
}

/// Euclidean norm of a vector. The empty vector has norm `0.0`.
///
/// Accumulated with [`f64::hypot`], so entries whose squares overflow still
/// give a finite norm.
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc: f64, &x| acc.hypot(x))
}

/// Frobenius norm: the square root of the sum of all squared entries.
pub fn frobenius_norm(a: &Matrix) -> f64 {
    norm2(a.as_slice())
}
