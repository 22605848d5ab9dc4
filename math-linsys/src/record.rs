//! Benchmark records
//!
//! One JSON file per run, named `{algorithm}_{method}_{size}_{seed}.json`.
//! Gauss runs have no method; their file name carries `None` in its place.

use crate::cholesky::CholeskyStrategy;
use crate::config::Algorithm;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one timed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Elapsed time in milliseconds
    pub time: u128,
    /// Algorithm that was timed
    pub algorithm: Algorithm,
    /// Size of the system
    pub size: usize,
    /// Seed of the generated system
    pub seed: u64,
    /// Cholesky traversal order, `None` for Gauss
    pub method: Option<CholeskyStrategy>,
    /// Whether the vectorized kernel was used, `None` for Gauss
    pub jit: Option<bool>,
}

impl BenchmarkRecord {
    /// File name of this record inside an output directory
    pub fn file_name(&self) -> String {
        let method = self.method.map_or("None", |m| m.name());
        format!(
            "{}_{}_{}_{}.json",
            self.algorithm, method, self.size, self.seed
        )
    }

    /// Write the record as pretty JSON into `dir`, creating it if needed.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;

        log::info!("Benchmark record saved to {}", path.display());
        Ok(path)
    }

    /// Read a record back from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cholesky_record() -> BenchmarkRecord {
        BenchmarkRecord {
            time: 12,
            algorithm: Algorithm::Cholesky,
            size: 100,
            seed: 20,
            method: Some(CholeskyStrategy::Diagonal),
            jit: Some(true),
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(cholesky_record().file_name(), "cholesky_diagonal_100_20.json");

        let gauss = BenchmarkRecord {
            algorithm: Algorithm::Gauss,
            method: None,
            jit: None,
            ..cholesky_record()
        };
        assert_eq!(gauss.file_name(), "gauss_None_100_20.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let record = cholesky_record();

        let path = record.save(dir.path().join("results")).unwrap();
        assert!(path.ends_with("cholesky_diagonal_100_20.json"));

        let loaded = BenchmarkRecord::load(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(cholesky_record()).unwrap();
        assert_eq!(json["algorithm"], "cholesky");
        assert_eq!(json["method"], "diagonal");
        assert_eq!(json["jit"], true);
        assert_eq!(json["time"], 12);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchmarkRecord::load(dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_io_error());
    }
}
