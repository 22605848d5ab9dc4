//! Gaussian elimination without pivoting
//!
//! Reduces an augmented matrix `[A | b]` to row-echelon form. The pivots are
//! taken in place on the diagonal: a zero leading pivot makes the input
//! unusable, later zero pivots are not detected and produce `inf`/`nan`.

use crate::error::{LinsysError, Result};
use crate::matrix::first_non_finite;
use crate::progress;
use ndarray::{Array2, Axis, s};
use serde::{Deserialize, Serialize};

/// Gaussian elimination configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussConfig {
    /// Fail with [`LinsysError::NumericalInstability`] on `nan`/`inf` in the result
    pub strict: bool,
    /// Draw a progress bar over the pivot rows
    pub progress: bool,
}

/// Eliminate the augmented matrix `Ab` (`n x (n+1)`).
///
/// # Returns
/// - `Ok(Some(U))`, `U` upper triangular in its first `n` columns
/// - `Ok(None)` if `Ab[0,0] == 0`
/// - `Err(EmptySystem)` / `Err(DimensionMismatch)` for a malformed `Ab`
/// - `Err(NumericalInstability)` in strict mode when `U` has a non-finite entry
pub fn compute(ab: &Array2<f64>, config: &GaussConfig) -> Result<Option<Array2<f64>>> {
    let (n, m) = ab.dim();
    if n == 0 {
        return Err(LinsysError::EmptySystem);
    }
    if m != n + 1 {
        return Err(LinsysError::DimensionMismatch {
            expected: n + 1,
            got: m,
        });
    }

    if ab[[0, 0]] == 0.0 {
        log::info!("Leading pivot is zero, cannot eliminate without pivoting");
        return Ok(None);
    }

    log::info!("Computing Gaussian elimination on a {}x{} system", n, m);

    let mut matrix = ab.to_owned();
    let pb = progress::bar("Gauss", config.progress);
    pb.set_length(n as u64);

    for i in 0..n {
        let (pivot_rows, mut below) = matrix.view_mut().split_at(Axis(0), i + 1);
        let pivot = pivot_rows[[i, i]];
        let pivot_tail = pivot_rows.slice(s![i, i + 1..]);

        for mut row in below.rows_mut() {
            let lead = row[i];
            if lead != 0.0 {
                let factor = lead / pivot;
                // lead - factor * pivot, without the rounding residue
                row[i] = 0.0;
                row.slice_mut(s![i + 1..])
                    .zip_mut_with(&pivot_tail, |x, &p| *x -= factor * p);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if config.strict
        && let Some((row, col, value)) = first_non_finite(&matrix.view())
    {
        return Err(LinsysError::NumericalInstability { row, col, value });
    }

    Ok(Some(matrix))
}
