//! Anti-diagonal (wavefront) Cholesky
//!
//! The lower triangle is swept along anti-diagonals `i + j = s` for
//! `s = 0..2n-1`. An entry `(i, j)` only reads `L[i, k]` and `L[j, k]` with
//! `k < j`, whose index sums are smaller than `s`, and `L[j, j]`, whose sum
//! `2j` is smaller than `s` off the diagonal. The entries of one sweep are
//! therefore independent of each other and are evaluated together through
//! [`crate::parallel::parallel_map`].
//!
//! Sweep order:
//!
//! ```text
//! s < n-1 :  (s, 0), (s-1, 1), ..., (s - s/2, s/2)
//! s >= n-1:  (n-1, s-n+1), (n-2, s-n+2), ...   while i >= j
//! ```

use super::kernel::{CholeskyKernel, lower_entry};
use crate::parallel::parallel_map;
use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView2};

/// Number of sweeps for an `n x n` matrix
#[inline]
pub fn sweep_count(n: usize) -> usize {
    if n == 0 { 0 } else { 2 * n - 1 }
}

/// Lower-triangle cells of sweep `s`, bottom row first.
pub fn sweep_cells(n: usize, s: usize) -> Vec<(usize, usize)> {
    debug_assert!(s < sweep_count(n));
    let mut cells = Vec::with_capacity(s / 2 + 1);

    if s + 1 < n {
        // first half: starts on column 0
        cells.push((s, 0));
        for z in 1..=s / 2 {
            cells.push((s - z, z));
        }
    } else {
        // second half: starts on the last row, one sweep per column
        let first_half = n - 1;
        let internal = 2 * n - 2 - s;
        cells.push((n - 1, s - first_half));
        for z in 1..=internal / 2 {
            cells.push((n - 1 - z, s - first_half + z));
        }
    }

    cells
}

/// The full visiting order, one `Vec` per sweep
pub fn wavefront_order(n: usize) -> Vec<Vec<(usize, usize)>> {
    (0..sweep_count(n)).map(|s| sweep_cells(n, s)).collect()
}

/// Factor `A` sweeping its anti-diagonals.
pub fn factor_by_diagonal<K: CholeskyKernel>(a: &ArrayView2<f64>, kernel: &K) -> Array2<f64> {
    diagonal_order(a, kernel, &ProgressBar::hidden())
}

/// [`factor_by_diagonal`] ticking `progress` once per sweep
pub(crate) fn diagonal_order<K: CholeskyKernel>(
    a: &ArrayView2<f64>,
    kernel: &K,
    progress: &ProgressBar,
) -> Array2<f64> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    progress.set_length(sweep_count(n) as u64);

    for s in 0..sweep_count(n) {
        let cells = sweep_cells(n, s);
        let values = {
            let known = l.view();
            parallel_map(&cells, |&(i, j)| lower_entry(kernel, a, &known, i, j))
        };
        for (&(i, j), value) in cells.iter().zip(values) {
            l[[i, j]] = value;
        }
        progress.inc(1);
    }

    l
}
