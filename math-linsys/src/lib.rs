//! Dense direct solvers for `Ax = b`
//!
//! This crate solves dense linear systems with two classic direct methods and
//! the tooling to check and time them.
//!
//! # Features
//!
//! - **Cholesky**: `L L^T` factorization of symmetric positive definite
//!   matrices, computed by row, by column or along anti-diagonals
//!   (wavefront, parallel with the `rayon` feature)
//! - **Gaussian elimination**: row-echelon form of an augmented matrix,
//!   without pivoting
//! - **Triangular solves**: forward and backward substitution
//! - **Verification**: tolerance-based checks of factors and solutions
//! - **Driver**: seeded data generation, timing and JSON benchmark records
//!
//! # Example
//!
//! ```
//! use math_linsys::{CholeskyConfig, SolveRequest, Tolerance, cholesky, generate_data, solve};
//! use math_linsys::verify::is_correct_solution;
//!
//! let (a, b) = generate_data(50, 20);
//! let l = cholesky::compute(&a, &CholeskyConfig::default())?
//!     .expect("generated matrices are SPD");
//! let x = solve(SolveRequest::cholesky(&l, &b))?;
//! assert!(is_correct_solution(&a, &x, &b, &Tolerance::default()));
//! # Ok::<(), math_linsys::LinsysError>(())
//! ```

pub mod checks;
pub mod cholesky;
pub mod config;
pub mod error;
pub mod gauss;
pub mod generator;
pub mod harness;
pub mod matrix;
pub mod parallel;
pub mod progress;
pub mod record;
pub mod timing;
pub mod triangular;
pub mod verify;

pub use error::{LinsysError, Result};
pub use matrix::Tolerance;

// Re-export solver configurations
pub use cholesky::{CholeskyConfig, CholeskyStrategy, Kernel};
pub use gauss::GaussConfig;
pub use triangular::{SolveRequest, solve, solve_with_progress};

// Re-export the driver
pub use config::{Algorithm, RunConfig};
pub use generator::{DataGenerator, generate_data};
pub use harness::{SimpleReport, benchmark, find_limit, simple_test};
pub use record::BenchmarkRecord;
