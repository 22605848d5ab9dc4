//! Test driver
//!
//! Three ways of exercising the solvers on generated systems:
//! - [`simple_test`]: factor, verify, solve and verify once, with timings
//! - [`find_limit`]: time Cholesky on doubling sizes
//! - [`benchmark`]: time one factorization and save a [`BenchmarkRecord`]

use crate::cholesky;
use crate::config::{Algorithm, RunConfig};
use crate::error::{LinsysError, Result};
use crate::gauss;
use crate::generator::generate_data;
use crate::matrix::augment;
use crate::record::BenchmarkRecord;
use crate::timing::timed;
use crate::triangular::{SolveRequest, solve_with_progress};
use crate::verify::{
    is_correct_elimination, is_correct_factorization, is_correct_solution, residual,
};
use ndarray::Array1;

/// Outcome of [`simple_test`]
#[derive(Debug, Clone)]
pub struct SimpleReport {
    /// Solver that ran
    pub algorithm: Algorithm,
    /// Size of the system
    pub size: usize,
    /// Solution `x`
    pub solution: Array1<f64>,
    /// Factorization or elimination time in milliseconds
    pub factor_time: u128,
    /// Triangular solve time in milliseconds
    pub solve_time: u128,
    /// The factor passed its check
    pub factor_correct: bool,
    /// `A x ≈ b` holds
    pub solution_correct: bool,
}

impl SimpleReport {
    /// Both checks passed
    pub fn is_correct(&self) -> bool {
        self.factor_correct && self.solution_correct
    }
}

fn mark(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}

/// Generate one system, solve it and check every step.
///
/// Fails with [`LinsysError::Unfactorizable`] when the matrix does not pass
/// the Cholesky checks and with [`LinsysError::ZeroLeadingPivot`] when Gauss
/// cannot start.
pub fn simple_test(config: &RunConfig) -> Result<SimpleReport> {
    let (a, b) = generate_data(config.size, config.seed);
    log::info!("A:\n{}", a);
    log::info!("b:\n{}", b);

    let (factor_time, factor_correct, solve_time, solution) = match config.algorithm {
        Algorithm::Cholesky => {
            log::info!("CHOLESKY FACTORIZATION ...");
            let (factor_time, l) = timed(|| cholesky::compute(&a, &config.cholesky(false)));
            let l = l?.ok_or(LinsysError::Unfactorizable)?;
            let factor_correct = is_correct_factorization(&a, &l, &config.tolerance);
            log::info!("L:\n{}", l);
            log::info!("Factor correct: {}", mark(factor_correct));
            log::info!("Execution time: {} ms", factor_time);

            log::info!("SOLVING LINEAR SYSTEM ...");
            let (solve_time, x) =
                timed(|| solve_with_progress(SolveRequest::cholesky(&l, &b), config.progress));
            (factor_time, factor_correct, solve_time, x?)
        }
        Algorithm::Gauss => {
            let ab = augment(&a, &b)?;
            log::info!("Ab:\n{}", ab);

            log::info!("GAUSSIAN ELIMINATION ...");
            let (factor_time, u) = timed(|| gauss::compute(&ab, &config.gauss()));
            let u = u?.ok_or(LinsysError::ZeroLeadingPivot)?;
            let factor_correct = is_correct_elimination(&a, &u, &b, &config.tolerance);
            log::info!("U:\n{}", u);
            log::info!("Elimination correct: {}", mark(factor_correct));
            log::info!("Execution time: {} ms", factor_time);

            log::info!("SOLVING LINEAR SYSTEM ...");
            let (solve_time, x) =
                timed(|| solve_with_progress(SolveRequest::gauss(&u), config.progress));
            (factor_time, factor_correct, solve_time, x?)
        }
    };

    let solution_correct = is_correct_solution(&a, &solution, &b, &config.tolerance);
    log::info!("x:\n{}", solution);
    log::info!("Solution correct: {}", mark(solution_correct));
    if let Some(r) = residual(&a, &solution, &b) {
        log::debug!("Max residual: {:e}", r.fold(0.0_f64, |m, v| m.max(v.abs())));
    }
    log::info!("Execution time: {} ms", solve_time);

    Ok(SimpleReport {
        algorithm: config.algorithm,
        size: config.size,
        solution,
        factor_time,
        solve_time,
        factor_correct,
        solution_correct,
    })
}

/// Time Cholesky on sizes `starting_size, 2*starting_size, ...` up to `max_size`.
///
/// Returns `(size, milliseconds)` for every size that ran. A size whose matrix
/// fails the checks is still timed and reported.
pub fn find_limit(
    config: &RunConfig,
    starting_size: usize,
    max_size: usize,
) -> Result<Vec<(usize, u128)>> {
    let cholesky_config = config.cholesky(false);
    let mut timings = Vec::new();
    let mut size = starting_size.max(1);

    while size <= max_size {
        log::info!("SIZE: {}x{}", size, size);
        let (a, _) = generate_data(size, config.seed);

        let (elapsed, l) = timed(|| cholesky::compute(&a, &cholesky_config));
        if l?.is_none() {
            log::warn!("Matrix of size {} could not be factored", size);
        }
        log::info!("Cholesky execution time: {} ms", elapsed);

        timings.push((size, elapsed));
        size = match size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(timings)
}

/// Time one factorization (Cholesky without checks) or elimination and save
/// the record into `config.output_dir`.
pub fn benchmark(config: &RunConfig) -> Result<BenchmarkRecord> {
    log::info!("Generating data ...");
    let (a, b) = generate_data(config.size, config.seed);

    let record = match config.algorithm {
        Algorithm::Cholesky => {
            log::info!(
                "ALGORITHM: Cholesky (by {}), SIZE: {}x{}, SEED: {}, JIT: {}",
                config.method,
                config.size,
                config.size,
                config.seed,
                config.jit()
            );
            let (time, l) = timed(|| cholesky::compute(&a, &config.cholesky(true)));
            l?;
            BenchmarkRecord {
                time,
                algorithm: Algorithm::Cholesky,
                size: config.size,
                seed: config.seed,
                method: Some(config.method),
                jit: Some(config.jit()),
            }
        }
        Algorithm::Gauss => {
            log::info!(
                "ALGORITHM: Gauss, SIZE: {}x{}, SEED: {}",
                config.size,
                config.size,
                config.seed
            );
            let ab = augment(&a, &b)?;
            let (time, u) = timed(|| gauss::compute(&ab, &config.gauss()));
            if u?.is_none() {
                log::warn!("Leading pivot is zero, elimination skipped");
            }
            BenchmarkRecord {
                time,
                algorithm: Algorithm::Gauss,
                size: config.size,
                seed: config.seed,
                method: None,
                jit: None,
            }
        }
    };

    log::info!("Execution time: {} ms", record.time);
    record.save(&config.output_dir)?;
    Ok(record)
}
