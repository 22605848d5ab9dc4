//! Row-by-row Cholesky
//!
//! Walks the upper triangle row by row, which builds `U = L^T`: every entry of
//! row `i` divides by `U[i,i]`, computed first. The result is transposed once
//! at the end.

use super::kernel::{CholeskyKernel, upper_entry};
use crate::matrix::transpose;
use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView2};

/// Factor `A` visiting `i` in `0..n` and then `j` in `i..n`.
pub fn factor_by_row<K: CholeskyKernel>(a: &ArrayView2<f64>, kernel: &K) -> Array2<f64> {
    row_order(a, kernel, &ProgressBar::hidden())
}

/// [`factor_by_row`] ticking `progress` once per row of `U`
pub(crate) fn row_order<K: CholeskyKernel>(
    a: &ArrayView2<f64>,
    kernel: &K,
    progress: &ProgressBar,
) -> Array2<f64> {
    let n = a.nrows();
    let mut u = Array2::<f64>::zeros((n, n));
    progress.set_length(n as u64);

    for i in 0..n {
        for j in i..n {
            let value = upper_entry(kernel, a, &u.view(), i, j);
            u[[i, j]] = value;
        }
        progress.inc(1);
    }

    transpose(&u.view())
}
