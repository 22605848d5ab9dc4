//! Correctness checks for factors and solutions
//!
//! All comparisons are tolerance based (see [`Tolerance`]); a shape mismatch
//! or a `nan` anywhere makes a check fail instead of erroring.

use crate::matrix::{Tolerance, gram, matvec};
use crate::triangular::{SolveRequest, solve};
use ndarray::{Array1, Array2};

/// Residual `A x - b`, `None` on a shape mismatch.
pub fn residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    if a.nrows() != b.len() {
        return None;
    }
    matvec(&a.view(), &x.view()).ok().map(|ax| ax - b)
}

/// Check `A x ≈ b`
pub fn is_correct_solution(
    a: &Array2<f64>,
    x: &Array1<f64>,
    b: &Array1<f64>,
    tol: &Tolerance,
) -> bool {
    match matvec(&a.view(), &x.view()) {
        Ok(ax) => tol.all_close_vec(&b.view(), &ax.view()),
        Err(_) => false,
    }
}

/// Check `L L^T ≈ A`
pub fn is_correct_factorization(a: &Array2<f64>, l: &Array2<f64>, tol: &Tolerance) -> bool {
    if l.nrows() != l.ncols() {
        return false;
    }
    let rebuilt = gram(&l.view());
    tol.all_close(&a.view(), &rebuilt.view())
}

/// Check a Gaussian elimination result by back-substituting it and testing `A x ≈ b`.
pub fn is_correct_elimination(
    a: &Array2<f64>,
    u: &Array2<f64>,
    b: &Array1<f64>,
    tol: &Tolerance,
) -> bool {
    match solve(SolveRequest::gauss(u)) {
        Ok(x) => is_correct_solution(a, &x, b, tol),
        Err(err) => {
            log::warn!("Cannot back-substitute elimination result: {}", err);
            false
        }
    }
}
