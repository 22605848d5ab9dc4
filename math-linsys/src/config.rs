//! JSON configuration of a driver run
//!
//! Every field has a default, so a configuration file only needs to list the
//! values it changes:
//!
//! ```json
//! { "algorithm": "gauss", "size": 500, "seed": 3 }
//! ```

use crate::cholesky::{CholeskyConfig, CholeskyStrategy, Kernel};
use crate::error::Result;
use crate::gauss::GaussConfig;
use crate::matrix::Tolerance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Solver driven by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Cholesky factorization then two triangular solves
    #[default]
    Cholesky,
    /// Gaussian elimination then back substitution
    Gauss,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Cholesky => f.write_str("cholesky"),
            Algorithm::Gauss => f.write_str("gauss"),
        }
    }
}

/// Driver run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Solver to run
    pub algorithm: Algorithm,
    /// Cholesky traversal order
    pub method: CholeskyStrategy,
    /// Cholesky partial-sum kernel
    pub kernel: Kernel,
    /// Size of the generated system
    pub size: usize,
    /// Seed of the generated system
    pub seed: u64,
    /// Fail on `nan`/`inf` in a factor
    pub strict: bool,
    /// Tolerance of the correctness checks
    pub tolerance: Tolerance,
    /// Tolerance of the symmetry check before Cholesky
    pub symmetry_tolerance: Tolerance,
    /// Directory receiving benchmark records
    pub output_dir: PathBuf,
    /// Draw progress bars over the solver loops
    pub progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            method: CholeskyStrategy::default(),
            kernel: Kernel::default(),
            size: 10_000,
            seed: 20,
            strict: false,
            tolerance: Tolerance::default(),
            symmetry_tolerance: Tolerance::symmetry(),
            output_dir: PathBuf::from("results"),
            progress: false,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        log::info!("Loaded run configuration from {}", path.display());
        Ok(config)
    }

    /// Cholesky settings for this run
    pub fn cholesky(&self, skip_checks: bool) -> CholeskyConfig {
        CholeskyConfig {
            strategy: self.method,
            kernel: self.kernel,
            skip_checks,
            strict: self.strict,
            symmetry_tolerance: self.symmetry_tolerance,
            progress: self.progress,
        }
    }

    /// Gauss settings for this run
    pub fn gauss(&self) -> GaussConfig {
        GaussConfig {
            strict: self.strict,
            progress: self.progress,
        }
    }

    /// Whether the vectorized kernel is selected
    pub fn jit(&self) -> bool {
        self.kernel == Kernel::Vectorized
    }
}
