//! Triangular solves
//!
//! Turns a factorization into the solution of `Ax = b`:
//! - Cholesky: forward substitution with `L`, then backward substitution with `L^T`
//! - Gauss: backward substitution on the augmented row-echelon matrix
//!
//! The two paths take different inputs, expressed by [`SolveRequest`].

use crate::error::{LinsysError, Result};
use crate::progress;
use indicatif::ProgressBar;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Input of [`solve`]
#[derive(Debug, Clone, Copy)]
pub enum SolveRequest<'a> {
    /// Lower factor `L` (`n x n`) and known terms `b` (`n`)
    Cholesky {
        /// Lower triangular factor
        l: ArrayView2<'a, f64>,
        /// Known terms
        b: ArrayView1<'a, f64>,
    },
    /// Augmented row-echelon matrix `U` (`n x (n+1)`), known terms in the last column
    Gauss {
        /// Output of Gaussian elimination
        u: ArrayView2<'a, f64>,
    },
}

impl<'a> SolveRequest<'a> {
    /// Request for the Cholesky path
    pub fn cholesky(l: &'a ndarray::Array2<f64>, b: &'a Array1<f64>) -> Self {
        SolveRequest::Cholesky {
            l: l.view(),
            b: b.view(),
        }
    }

    /// Request for the Gauss path
    pub fn gauss(u: &'a ndarray::Array2<f64>) -> Self {
        SolveRequest::Gauss { u: u.view() }
    }
}

/// Solve the system described by `request`.
pub fn solve(request: SolveRequest<'_>) -> Result<Array1<f64>> {
    solve_with_progress(request, false)
}

/// [`solve`], drawing a progress bar over the substitution rows when `show_progress`.
pub fn solve_with_progress(request: SolveRequest<'_>, show_progress: bool) -> Result<Array1<f64>> {
    let pb = progress::bar("Solve", show_progress);
    let x = match request {
        SolveRequest::Cholesky { l, b } => solve_cholesky(&l, &b, &pb),
        SolveRequest::Gauss { u } => solve_gauss(&u, &pb),
    };
    pb.finish_and_clear();
    x
}

fn solve_cholesky(
    l: &ArrayView2<f64>,
    b: &ArrayView1<f64>,
    pb: &ProgressBar,
) -> Result<Array1<f64>> {
    let n = l.nrows();
    if l.ncols() != n {
        return Err(LinsysError::NotSquare {
            rows: n,
            cols: l.ncols(),
        });
    }
    if b.len() != n {
        return Err(LinsysError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    log::info!("Solving Cholesky system of size {}", n);

    pb.set_length(2 * n as u64);
    let y = forward(l, b, pb);
    Ok(backward(&l.t(), &y.view(), pb))
}

fn solve_gauss(u: &ArrayView2<f64>, pb: &ProgressBar) -> Result<Array1<f64>> {
    let n = u.nrows();
    if n == 0 {
        return Err(LinsysError::EmptySystem);
    }
    if u.ncols() != n + 1 {
        return Err(LinsysError::DimensionMismatch {
            expected: n + 1,
            got: u.ncols(),
        });
    }

    log::info!("Solving Gauss system of size {}", n);

    pb.set_length(n as u64);
    let mut x = Array1::<f64>::zeros(n);
    x[n - 1] = u[[n - 1, n]] / u[[n - 1, n - 1]];
    pb.inc(1);

    for i in (0..n - 1).rev() {
        let mut value = u[[i, n]];
        for j in (i + 1)..n {
            value -= u[[i, j]] * x[j];
        }
        x[i] = value / u[[i, i]];
        pb.inc(1);
    }

    Ok(x)
}

/// Solve `L y = b` for lower triangular `L`, ascending.
///
/// `y[i] = (b[i] - Σ_{j<i} L[i,j] y[j]) / L[i,i]`. Shapes are not checked.
pub fn forward_substitution(l: &ArrayView2<f64>, b: &ArrayView1<f64>) -> Array1<f64> {
    forward(l, b, &ProgressBar::hidden())
}

fn forward(l: &ArrayView2<f64>, b: &ArrayView1<f64>, pb: &ProgressBar) -> Array1<f64> {
    let n = b.len();
    let mut y = Array1::<f64>::zeros(n);

    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
        pb.inc(1);
    }

    y
}

/// Solve `U x = y` for upper triangular `U`, descending.
///
/// `x[i] = (y[i] - Σ_{j>i} U[i,j] x[j]) / U[i,i]`. Shapes are not checked.
pub fn backward_substitution(u: &ArrayView2<f64>, y: &ArrayView1<f64>) -> Array1<f64> {
    backward(u, y, &ProgressBar::hidden())
}

fn backward(u: &ArrayView2<f64>, y: &ArrayView1<f64>, pb: &ProgressBar) -> Array1<f64> {
    let n = y.len();
    let mut x = Array1::<f64>::zeros(n);

    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += u[[i, j]] * x[j];
        }
        x[i] = (y[i] - sum) / u[[i, i]];
        pb.inc(1);
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    #[test]
    fn test_forward_backward() {
        let l = array![[2.0_f64, 0.0], [1.0, 3.0]];
        let b = array![4.0_f64, 11.0];

        let y = forward_substitution(&l.view(), &b.view());
        assert_relative_eq!(y[0], 2.0);
        assert_relative_eq!(y[1], 3.0);

        let u = array![[2.0_f64, 1.0], [0.0, 3.0]];
        let x = backward_substitution(&u.view(), &array![4.0_f64, 6.0].view());
        assert_relative_eq!(x[1], 2.0);
        assert_relative_eq!(x[0], 1.0);
    }

    #[test]
    fn test_cholesky_path() {
        // A = L L^T = [[4, 12, -16], [12, 37, -43], [-16, -43, 98]], x = [1, 1, 1]
        let l = array![[2.0_f64, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];
        let b = array![0.0_f64, 6.0, 39.0];

        let x = solve(SolveRequest::cholesky(&l, &b)).expect("solve should succeed");
        for xi in x.iter() {
            assert_relative_eq!(*xi, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_path() {
        // [[2, 1], [1, 2]] x = [3, 3] after elimination
        let u = array![[2.0_f64, 1.0, 3.0], [0.0, 1.5, 1.5]];
        let x = solve(SolveRequest::gauss(&u)).expect("solve should succeed");
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 1.0);

        let single = array![[9.0_f64, 9.0]];
        let x = solve(SolveRequest::gauss(&single)).unwrap();
        assert_eq!(x, array![1.0]);
    }

    #[test]
    fn test_progress_counts_rows() {
        let l = array![[2.0_f64, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];
        let b = array![0.0_f64, 6.0, 39.0];
        let pb = ProgressBar::hidden();
        let x = solve_cholesky(&l.view(), &b.view(), &pb).unwrap();
        assert_eq!(pb.position(), 6);
        assert_eq!(x, solve_with_progress(SolveRequest::cholesky(&l, &b), true).unwrap());

        let u = array![[2.0_f64, 1.0, 3.0], [0.0, 1.5, 1.5]];
        let pb = ProgressBar::hidden();
        solve_gauss(&u.view(), &pb).unwrap();
        assert_eq!(pb.position(), 2);
    }

    #[test]
    fn test_shape_errors() {
        let l = array![[2.0_f64, 0.0], [1.0, 3.0]];
        let b = array![1.0_f64, 2.0, 3.0];
        let err = solve(SolveRequest::cholesky(&l, &b)).unwrap_err();
        assert!(matches!(
            err,
            LinsysError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));

        let rect = array![[2.0_f64, 0.0, 1.0], [1.0, 3.0, 1.0]];
        let b2 = array![1.0_f64, 2.0];
        assert!(solve(SolveRequest::cholesky(&rect, &b2)).is_err());

        let square = array![[2.0_f64, 1.0], [0.0, 1.0]];
        assert!(solve(SolveRequest::gauss(&square)).is_err());

        let empty = Array2::<f64>::zeros((0, 1));
        assert!(matches!(
            solve(SolveRequest::gauss(&empty)),
            Err(LinsysError::EmptySystem)
        ));
    }

    #[test]
    fn test_cholesky_empty_system() {
        let l = Array2::<f64>::zeros((0, 0));
        let b = Array1::<f64>::zeros(0);
        let x = solve(SolveRequest::cholesky(&l, &b)).unwrap();
        assert!(x.is_empty());
    }
}
