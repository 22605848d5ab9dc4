//! Cholesky preconditions
//!
//! A matrix can be factored as `L * L^T` over the reals exactly when it is
//! square, symmetric and positive definite. The checks below are run in that
//! order and stop at the first failure.

use crate::matrix::{Tolerance, is_square as has_square_shape};
use faer::Mat;
use ndarray::ArrayView2;

/// Check `rows(A) == cols(A)`
pub fn is_square(a: &ArrayView2<f64>) -> bool {
    log::info!("Checking IS SQUARE");
    has_square_shape(a)
}

/// Check `A[i,j] ≈ A[j,i]` for every pair of indices.
///
/// Non-square matrices are never symmetric.
pub fn is_symmetric(a: &ArrayView2<f64>, tol: &Tolerance) -> bool {
    log::info!("Checking IS SYMMETRIC");
    has_square_shape(a) && tol.all_close(&a.t(), a)
}

/// Check that every eigenvalue of `A` has a strictly positive real part.
///
/// Eigenvalues come from a general (non-symmetric) dense eigensolver, so the
/// whole matrix is read. A failing eigensolver, an empty or a non-square
/// matrix all count as "not positive definite".
pub fn is_positive_definite(a: &ArrayView2<f64>) -> bool {
    log::info!("Checking IS POSITIVE DEFINITE");
    let n = a.nrows();
    if n == 0 || !has_square_shape(a) {
        return false;
    }

    let mat = Mat::from_fn(n, n, |i, j| a[[i, j]]);
    match mat.as_ref().eigenvalues() {
        Ok(values) => values.iter().all(|lambda| lambda.re > 0.0),
        Err(err) => {
            log::warn!("Eigenvalue computation failed: {:?}", err);
            false
        }
    }
}

/// Run the three Cholesky requirements, stopping at the first that fails.
pub fn check_requirements(a: &ArrayView2<f64>, symmetry_tol: &Tolerance) -> bool {
    log::info!("Checking Cholesky requirements");
    is_square(a) && is_symmetric(a, symmetry_tol) && is_positive_definite(a)
}
