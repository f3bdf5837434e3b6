//! Error types for batch processing.

use thiserror::Error;

/// Errors that can occur during batch processing.
///
/// Per-item failures never surface here. They are absorbed by the retry
/// loop, and only the aggregate condition reaches the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Every round was dispatched and some items still had not succeeded.
    #[error("Batch execution failed: {remaining} item(s) still failing after {rounds} round(s)")]
    RoundsExhausted {
        /// Number of rounds dispatched.
        rounds: usize,
        /// Number of items left in the pending set.
        remaining: usize,
    },

    /// Invalid configuration or input.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The blocking entry point could not start its runtime.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Result type alias for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
