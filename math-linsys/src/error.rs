//! Error types for the dense solvers.
//!
//! Unfactorizable input is not an error: the factorization entry points
//! return `Ok(None)` for it. The variants below cover malformed shapes,
//! strict-mode numerical failures and the I/O of the driver.

use thiserror::Error;

/// Errors that can occur while factoring, eliminating or solving.
#[derive(Debug, Error)]
pub enum LinsysError {
    /// A square matrix was required.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// An operand does not have the size implied by the system.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Actual size provided
        got: usize,
    },

    /// The system has no unknowns.
    #[error("empty system: at least one equation is required")]
    EmptySystem,

    /// A non-finite value appeared in a factor (strict mode only).
    #[error("numerical instability at ({row}, {col}): value {value}")]
    NumericalInstability {
        /// Row of the first non-finite entry
        row: usize,
        /// Column of the first non-finite entry
        col: usize,
        /// The offending value (`nan` or `inf`)
        value: f64,
    },

    /// The matrix does not satisfy the Cholesky requirements.
    #[error("matrix is not symmetric positive definite")]
    Unfactorizable,

    /// Gaussian elimination without pivoting met `Ab[0,0] == 0`.
    #[error("leading pivot is zero, elimination without pivoting is impossible")]
    ZeroLeadingPivot,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// (De)serializing a record or a configuration failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, LinsysError>;

impl LinsysError {
    /// Returns `true` if this is a shape-related error.
    ///
    /// This includes `NotSquare`, `DimensionMismatch` and `EmptySystem`.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            LinsysError::NotSquare { .. }
                | LinsysError::DimensionMismatch { .. }
                | LinsysError::EmptySystem
        )
    }

    /// Returns `true` if the input could not be processed numerically.
    ///
    /// This includes `NumericalInstability`, `Unfactorizable` and `ZeroLeadingPivot`.
    pub fn is_numerical_error(&self) -> bool {
        matches!(
            self,
            LinsysError::NumericalInstability { .. }
                | LinsysError::Unfactorizable
                | LinsysError::ZeroLeadingPivot
        )
    }

    /// Returns `true` if this error comes from the file system or from JSON.
    pub fn is_io_error(&self) -> bool {
        matches!(self, LinsysError::Io(_) | LinsysError::Json(_))
    }
}
