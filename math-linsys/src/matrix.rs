//! Dense matrix and vector helpers
//!
//! Thin layer over `ndarray` providing the operations the solvers share:
//! shape queries, augmentation, products and tolerance-based comparison.

use crate::error::{LinsysError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate};
use serde::{Deserialize, Serialize};

/// Absolute and relative tolerance for approximate equality.
///
/// Two values are close when `|a - b| <= atol + rtol * |b|`. The comparison is
/// asymmetric: `b` is the reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute tolerance
    pub atol: f64,
    /// Relative tolerance
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: 1e-3,
            rtol: 1e-3,
        }
    }
}

impl Tolerance {
    /// Create a tolerance from its absolute and relative parts
    pub const fn new(atol: f64, rtol: f64) -> Self {
        Self { atol, rtol }
    }

    /// Tolerance used for the symmetry check before Cholesky
    pub const fn symmetry() -> Self {
        Self {
            atol: 1e-8,
            rtol: 1e-5,
        }
    }

    /// Check `|a - b| <= atol + rtol * |b|`; `nan` is never close.
    #[inline]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a == b {
            // equal infinities
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    /// Elementwise [`Tolerance::is_close`] over two matrices of the same shape.
    ///
    /// Returns `false` when the shapes differ.
    pub fn all_close(&self, a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> bool {
        a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(&x, &y)| self.is_close(x, y))
    }

    /// Elementwise [`Tolerance::is_close`] over two vectors of the same length.
    pub fn all_close_vec(&self, a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| self.is_close(x, y))
    }
}

/// Check `rows(A) == cols(A)`
#[inline]
pub fn is_square(a: &ArrayView2<f64>) -> bool {
    a.nrows() == a.ncols()
}

/// Build the augmented matrix `[A | b]`.
pub fn augment(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array2<f64>> {
    if a.nrows() != b.len() {
        return Err(LinsysError::DimensionMismatch {
            expected: a.nrows(),
            got: b.len(),
        });
    }
    let column = b.view().insert_axis(Axis(1));
    concatenate(Axis(1), &[a.view(), column]).map_err(|_| LinsysError::DimensionMismatch {
        expected: a.nrows(),
        got: b.len(),
    })
}

/// Owned transpose of a matrix (standard row-major layout).
pub fn transpose(a: &ArrayView2<f64>) -> Array2<f64> {
    a.t().as_standard_layout().into_owned()
}

/// Compute `L * L^T`
pub fn gram(l: &ArrayView2<f64>) -> Array2<f64> {
    l.dot(&l.t())
}

/// Matrix-vector product `A * x`, checking the inner dimension.
pub fn matvec(a: &ArrayView2<f64>, x: &ArrayView1<f64>) -> Result<Array1<f64>> {
    if a.ncols() != x.len() {
        return Err(LinsysError::DimensionMismatch {
            expected: a.ncols(),
            got: x.len(),
        });
    }
    Ok(a.dot(x))
}

/// Position and value of the first non-finite entry, in row-major order.
pub fn first_non_finite(a: &ArrayView2<f64>) -> Option<(usize, usize, f64)> {
    a.indexed_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|((i, j), &v)| (i, j, v))
}

/// Check that every entry above the diagonal is exactly zero.
pub fn is_lower_triangular(a: &ArrayView2<f64>) -> bool {
    a.indexed_iter().all(|((i, j), &v)| j <= i || v == 0.0)
}

/// Check that every entry below the diagonal of the first `nrows` columns is exactly zero.
///
/// Works for augmented `n x (n+1)` matrices: the known-term column is ignored.
pub fn is_upper_triangular(a: &ArrayView2<f64>) -> bool {
    a.indexed_iter().all(|((i, j), &v)| j >= i || v == 0.0)
}
