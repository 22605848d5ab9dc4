//! Cholesky factorization for symmetric positive definite matrices
//!
//! Computes the lower triangular `L` with `L * L^T = A`. The recurrence is the
//! same for every [`CholeskyStrategy`], only the order in which the entries of
//! `L` are produced changes:
//!
//! - [`CholeskyStrategy::Column`]: column by column, diagonal first
//! - [`CholeskyStrategy::Row`]: row by row on `L^T`, transposed at the end
//! - [`CholeskyStrategy::Diagonal`]: anti-diagonal sweeps (wavefront)
//!
//! The partial sums are evaluated by a [`Kernel`]: plain index loops or
//! vectorized slice products.
//!
//! There is no pivot check inside the recurrence. A zero pivot or a negative
//! radicand yields `inf`/`nan` entries that propagate into the factor, unless
//! [`CholeskyConfig::strict`] is set.

mod column;
mod diagonal;
mod kernel;
mod row;

pub use column::factor_by_column;
pub use diagonal::{factor_by_diagonal, sweep_cells, sweep_count, wavefront_order};
pub use kernel::{CholeskyKernel, NaiveKernel, VectorizedKernel};
pub use row::factor_by_row;

use crate::checks::check_requirements;
use crate::error::{LinsysError, Result};
use crate::matrix::{Tolerance, first_non_finite};
use crate::parallel::is_parallel_available;
use crate::progress;
use indicatif::ProgressBar;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order in which the entries of `L` are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CholeskyStrategy {
    /// Outer loop over rows of `L^T`
    Row,
    /// Outer loop over columns of `L`
    #[default]
    Column,
    /// Anti-diagonal sweeps
    Diagonal,
}

impl CholeskyStrategy {
    /// All strategies, in declaration order
    pub const ALL: [CholeskyStrategy; 3] = [
        CholeskyStrategy::Row,
        CholeskyStrategy::Column,
        CholeskyStrategy::Diagonal,
    ];

    /// Lowercase name, as used in configuration files and benchmark records
    pub fn name(&self) -> &'static str {
        match self {
            CholeskyStrategy::Row => "row",
            CholeskyStrategy::Column => "column",
            CholeskyStrategy::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for CholeskyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluation of the partial sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// Scalar index loops
    #[default]
    Naive,
    /// Slice views and `ndarray` dot products
    Vectorized,
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Naive => f.write_str("naive"),
            Kernel::Vectorized => f.write_str("vectorized"),
        }
    }
}

/// Cholesky configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CholeskyConfig {
    /// Traversal order
    pub strategy: CholeskyStrategy,
    /// Partial-sum kernel
    pub kernel: Kernel,
    /// Skip the square/symmetric/positive-definite checks
    pub skip_checks: bool,
    /// Fail with [`LinsysError::NumericalInstability`] on `nan`/`inf` in the factor
    pub strict: bool,
    /// Tolerance of the symmetry check
    pub symmetry_tolerance: Tolerance,
    /// Draw a progress bar over the outer loop
    pub progress: bool,
}

impl Default for CholeskyConfig {
    fn default() -> Self {
        Self {
            strategy: CholeskyStrategy::default(),
            kernel: Kernel::default(),
            skip_checks: false,
            strict: false,
            symmetry_tolerance: Tolerance::symmetry(),
            progress: false,
        }
    }
}

impl CholeskyConfig {
    /// Default configuration with the given strategy
    pub fn with_strategy(strategy: CholeskyStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }
}

/// Factor `A` into `L * L^T`.
///
/// # Returns
/// - `Ok(Some(L))` with `L` lower triangular
/// - `Ok(None)` if `A` is not square, symmetric and positive definite
///   (only when the checks run)
/// - `Err(NotSquare)` if the checks are skipped and `A` is not square
/// - `Err(NumericalInstability)` in strict mode when `L` has a non-finite entry
pub fn compute(a: &Array2<f64>, config: &CholeskyConfig) -> Result<Option<Array2<f64>>> {
    let view = a.view();

    if config.skip_checks {
        log::info!("Skipping requirements");
        if a.nrows() != a.ncols() {
            return Err(LinsysError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
    } else if !check_requirements(&view, &config.symmetry_tolerance) {
        log::info!("Matrix does not satisfy the Cholesky requirements");
        return Ok(None);
    }

    log::info!(
        "Computing Cholesky factorization {} - kernel: {}",
        config.strategy,
        config.kernel
    );

    if config.strategy == CholeskyStrategy::Diagonal {
        log::debug!("Parallel wavefront sweeps: {}", is_parallel_available());
    }

    let pb = progress::bar("Cholesky", config.progress);
    let l = match config.kernel {
        Kernel::Naive => factor_tracked(&view, config.strategy, &NaiveKernel, &pb),
        Kernel::Vectorized => factor_tracked(&view, config.strategy, &VectorizedKernel, &pb),
    };
    pb.finish_and_clear();

    if config.strict
        && let Some((row, col, value)) = first_non_finite(&l.view())
    {
        return Err(LinsysError::NumericalInstability { row, col, value });
    }

    Ok(Some(l))
}

/// Run one strategy with one kernel, without any check.
pub fn factor_with<K: CholeskyKernel>(
    a: &ArrayView2<f64>,
    strategy: CholeskyStrategy,
    kernel: &K,
) -> Array2<f64> {
    factor_tracked(a, strategy, kernel, &ProgressBar::hidden())
}

fn factor_tracked<K: CholeskyKernel>(
    a: &ArrayView2<f64>,
    strategy: CholeskyStrategy,
    kernel: &K,
    progress: &ProgressBar,
) -> Array2<f64> {
    match strategy {
        CholeskyStrategy::Row => row::row_order(a, kernel, progress),
        CholeskyStrategy::Column => column::column_order(a, kernel, progress),
        CholeskyStrategy::Diagonal => diagonal::diagonal_order(a, kernel, progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{gram, is_lower_triangular};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn reference_matrix() -> Array2<f64> {
        array![[4.0_f64, 12.0, -16.0], [12.0, 37.0, -43.0], [-16.0, -43.0, 98.0]]
    }

    /// Diagonally dominant symmetric matrix, hence SPD
    fn spd(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                n as f64 + 1.0
            } else {
                1.0 / (1.0 + i.abs_diff(j) as f64)
            }
        })
    }

    #[test]
    fn test_reference_factor_all_strategies() {
        let a = reference_matrix();
        let expected = array![[2.0_f64, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];

        for strategy in CholeskyStrategy::ALL {
            let l = compute(&a, &CholeskyConfig::with_strategy(strategy))
                .expect("no error expected")
                .expect("matrix is SPD");
            assert_eq!(l, expected, "strategy {strategy}");
            assert_eq!(gram(&l.view()), a, "strategy {strategy}");
        }
    }

    #[test]
    fn test_strategies_and_kernels_agree() {
        let a = spd(12);
        let reference = factor_with(&a.view(), CholeskyStrategy::Column, &NaiveKernel);

        for strategy in CholeskyStrategy::ALL {
            for kernel in [Kernel::Naive, Kernel::Vectorized] {
                let config = CholeskyConfig {
                    strategy,
                    kernel,
                    ..Default::default()
                };
                let l = compute(&a, &config).unwrap().unwrap();
                assert!(is_lower_triangular(&l.view()));
                for (x, y) in l.iter().zip(reference.iter()) {
                    assert_relative_eq!(*x, *y, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_single_entry() {
        let a = array![[9.0_f64]];
        for strategy in CholeskyStrategy::ALL {
            let l = compute(&a, &CholeskyConfig::with_strategy(strategy))
                .unwrap()
                .unwrap();
            assert_eq!(l, array![[3.0]]);
        }
    }

    #[test]
    fn test_rejects_unfactorizable() {
        let config = CholeskyConfig::default();

        let non_square = array![[1.0_f64, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(compute(&non_square, &config).unwrap().is_none());

        let non_symmetric = array![[4.0_f64, 1.0], [3.0, 4.0]];
        assert!(compute(&non_symmetric, &config).unwrap().is_none());

        let indefinite = array![[1.0_f64, 2.0], [2.0, 1.0]];
        assert!(compute(&indefinite, &config).unwrap().is_none());
    }

    #[test]
    fn test_skip_checks_propagates_nan() {
        let indefinite = array![[1.0_f64, 2.0], [2.0, 1.0]];
        let config = CholeskyConfig {
            skip_checks: true,
            ..Default::default()
        };

        let l = compute(&indefinite, &config)
            .expect("non-strict mode never fails on values")
            .expect("checks are skipped");
        // 1 - 2^2 < 0
        assert!(l[[1, 1]].is_nan());
    }

    #[test]
    fn test_strict_reports_instability() {
        let singular = array![[0.0_f64, 0.0], [0.0, 1.0]];
        let config = CholeskyConfig {
            skip_checks: true,
            strict: true,
            ..Default::default()
        };

        match compute(&singular, &config) {
            Err(LinsysError::NumericalInstability { row, col, .. }) => {
                assert_eq!((row, col), (1, 0));
            }
            other => panic!("expected instability, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_checks_requires_square() {
        let rect = array![[1.0_f64, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let config = CholeskyConfig {
            skip_checks: true,
            ..Default::default()
        };
        let err = compute(&rect, &config).unwrap_err();
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_progress_does_not_change_factor() {
        let a = spd(6);
        for strategy in CholeskyStrategy::ALL {
            let quiet = compute(&a, &CholeskyConfig::with_strategy(strategy)).unwrap();
            let config = CholeskyConfig {
                progress: true,
                ..CholeskyConfig::with_strategy(strategy)
            };
            assert_eq!(compute(&a, &config).unwrap(), quiet);
        }
    }

    #[test]
    fn test_input_untouched() {
        let a = reference_matrix();
        let before = a.clone();
        let _ = compute(&a, &CholeskyConfig::with_strategy(CholeskyStrategy::Diagonal));
        assert_eq!(a, before);
    }

    #[test]
    fn test_strategy_names() {
        let names: Vec<&str> = CholeskyStrategy::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["row", "column", "diagonal"]);
        assert_eq!(CholeskyStrategy::Diagonal.to_string(), "diagonal");
        assert_eq!(
            serde_json::to_string(&CholeskyStrategy::Row).unwrap(),
            "\"row\""
        );
    }
}
