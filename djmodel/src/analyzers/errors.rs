//! Error types for the analyzer framework.

use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur while an analyzer inspects a column.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A statistic was requested from a column whose values cannot produce it.
    #[error("Type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    ArrowComputation(#[from] arrow::error::ArrowError),

    /// Data type mismatch or invalid data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid configuration or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl AnalyzerError {
    /// Creates a type mismatch error for the given column.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
