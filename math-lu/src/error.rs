//! Error types for LU factorization

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during LU factorization
///
/// Every variant is terminal for the call that produced it: no partial
/// factorization is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum LuError {
    /// A pivot was exactly zero at the given elimination step
    #[error("Matrix is singular: zero pivot at elimination step {step}")]
    SingularMatrix { step: usize },
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Matrix is empty")]
    EmptyMatrix,
    /// The native engine could not be loaded; a configuration problem, not a numeric one
    #[error("Native backend unavailable ({}): {reason}", .library.display())]
    BackendUnavailable { library: PathBuf, reason: String },
    /// A native engine returned a permutation that is not a bijection on [0, n)
    #[error("Invalid permutation entry {value} at index {index}")]
    InvalidPermutation { index: usize, value: i64 },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LuError {
    /// True for errors caused by the numeric content of the matrix
    pub fn is_numeric(&self) -> bool {
        matches!(self, LuError::SingularMatrix { .. })
    }
}
