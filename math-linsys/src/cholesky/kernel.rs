//! Partial dot products used by the Cholesky recurrence
//!
//! Every strategy needs the same two sums over the part of the factor that is
//! already known. A kernel decides how they are evaluated: [`NaiveKernel`]
//! walks the indices one by one, [`VectorizedKernel`] hands contiguous slices
//! to `ndarray`'s dot product. Both read the factor through a shared view and
//! return a value, so the caller is the only writer.

use ndarray::{ArrayView2, s};

/// How the partial sums of the recurrence are evaluated
pub trait CholeskyKernel: Send + Sync {
    /// Σ_{k < len} m[p, k] * m[q, k]
    fn row_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64;

    /// Σ_{k < len} m[k, p] * m[k, q]
    fn col_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64;
}

/// Index-by-index loops, one multiply-add at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveKernel;

impl CholeskyKernel for NaiveKernel {
    #[inline]
    fn row_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64 {
        let mut sum = 0.0;
        for k in 0..len {
            sum += m[[p, k]] * m[[q, k]];
        }
        sum
    }

    #[inline]
    fn col_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64 {
        let mut sum = 0.0;
        for k in 0..len {
            sum += m[[k, p]] * m[[k, q]];
        }
        sum
    }
}

/// Slice views and `ndarray::dot`, which unrolls and uses SIMD on contiguous data
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedKernel;

impl CholeskyKernel for VectorizedKernel {
    #[inline]
    fn row_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64 {
        m.slice(s![p, ..len]).dot(&m.slice(s![q, ..len]))
    }

    #[inline]
    fn col_dot(&self, m: &ArrayView2<f64>, p: usize, q: usize, len: usize) -> f64 {
        m.slice(s![..len, p]).dot(&m.slice(s![..len, q]))
    }
}

/// Entry `(i, j)`, `i >= j`, of the lower factor from the rows already known.
///
/// `L[i,i] = sqrt(A[i,i] - Σ_{k<i} L[i,k]^2)` and
/// `L[i,j] = (A[i,j] - Σ_{k<j} L[i,k] L[j,k]) / L[j,j]`.
#[inline]
pub(crate) fn lower_entry<K: CholeskyKernel>(
    kernel: &K,
    a: &ArrayView2<f64>,
    l: &ArrayView2<f64>,
    i: usize,
    j: usize,
) -> f64 {
    if i == j {
        (a[[i, i]] - kernel.row_dot(l, i, i, i)).sqrt()
    } else {
        (a[[i, j]] - kernel.row_dot(l, i, j, j)) / l[[j, j]]
    }
}

/// Entry `(i, j)`, `i <= j`, of the upper factor `U = L^T` from the columns already known.
///
/// `U[i,i] = sqrt(A[i,i] - Σ_{k<i} U[k,i]^2)` and
/// `U[i,j] = (A[i,j] - Σ_{k<i} U[k,i] U[k,j]) / U[i,i]`.
#[inline]
pub(crate) fn upper_entry<K: CholeskyKernel>(
    kernel: &K,
    a: &ArrayView2<f64>,
    u: &ArrayView2<f64>,
    i: usize,
    j: usize,
) -> f64 {
    if i == j {
        (a[[i, i]] - kernel.col_dot(u, i, i, i)).sqrt()
    } else {
        (a[[i, j]] - kernel.col_dot(u, i, j, i)) / u[[i, i]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_kernels_agree_on_partial_sums() {
        let m = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let v = m.view();

        for len in 0..=3 {
            assert_relative_eq!(
                NaiveKernel.row_dot(&v, 1, 2, len),
                VectorizedKernel.row_dot(&v, 1, 2, len)
            );
            assert_relative_eq!(
                NaiveKernel.col_dot(&v, 0, 2, len),
                VectorizedKernel.col_dot(&v, 0, 2, len)
            );
        }

        // 4*7 + 5*8
        assert_relative_eq!(NaiveKernel.row_dot(&v, 1, 2, 2), 68.0);
        // 1*3 + 4*6 + 7*9
        assert_relative_eq!(NaiveKernel.col_dot(&v, 0, 2, 3), 90.0);
        assert_relative_eq!(VectorizedKernel.row_dot(&v, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_entries_on_known_factor() {
        let a = array![[4.0_f64, 12.0, -16.0], [12.0, 37.0, -43.0], [-16.0, -43.0, 98.0]];
        let l = array![[2.0_f64, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 0.0]];

        // the last diagonal entry from the first two columns
        assert_relative_eq!(lower_entry(&NaiveKernel, &a.view(), &l.view(), 2, 2), 3.0);
        assert_relative_eq!(lower_entry(&NaiveKernel, &a.view(), &l.view(), 2, 1), 5.0);

        let u = l.t();
        assert_relative_eq!(upper_entry(&VectorizedKernel, &a.view(), &u, 2, 2), 3.0);
        assert_relative_eq!(upper_entry(&VectorizedKernel, &a.view(), &u, 1, 2), 5.0);
    }
}
