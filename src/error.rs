//! Error types for summation operations

use thiserror::Error;

use crate::Backend;

/// Result type for summation operations
pub type Result<T> = std::result::Result<T, SumaError>;

/// Errors that can occur during summation operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SumaError {
    /// Backend not supported on this platform
    #[error("Backend not supported on this platform: {0:?}")]
    UnsupportedBackend(Backend),

    /// An operand's length differs from the first operand's length
    #[error("vector lengths unequal: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the first operand
        expected: usize,
        /// Length of the offending operand
        actual: usize,
    },

    /// Empty vector (e.g., computing the mean of an empty vector)
    #[error("empty vector")]
    EmptyVector,
}
