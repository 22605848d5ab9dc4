//! Column-by-column Cholesky
//!
//! Fills `L` one column at a time: the diagonal entry first, then the entries
//! below it, which all divide by that diagonal.

use super::kernel::{CholeskyKernel, lower_entry};
use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView2};

/// Factor `A` visiting `j` in `0..n` and then `i` in `j..n`.
pub fn factor_by_column<K: CholeskyKernel>(a: &ArrayView2<f64>, kernel: &K) -> Array2<f64> {
    column_order(a, kernel, &ProgressBar::hidden())
}

/// [`factor_by_column`] ticking `progress` once per column
pub(crate) fn column_order<K: CholeskyKernel>(
    a: &ArrayView2<f64>,
    kernel: &K,
    progress: &ProgressBar,
) -> Array2<f64> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    progress.set_length(n as u64);

    for j in 0..n {
        for i in j..n {
            let value = lower_entry(kernel, a, &l.view(), i, j);
            l[[i, j]] = value;
        }
        progress.inc(1);
    }

    l
}
