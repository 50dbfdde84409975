//! Error types for the djmodel library.
//!
//! All fallible operations outside the analyzers return [`ModelError`]. Analyzer
//! failures keep their own [`AnalyzerError`] type and are wrapped unchanged when
//! they cross into model generation, so a failing statistic surfaces with its
//! original message.

use thiserror::Error;

use crate::analyzers::AnalyzerError;

/// The main error type for the djmodel library.
#[derive(Error, Debug)]
pub enum ModelError {
    /// An analyzer failed while inspecting a column.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from data source operations.
    #[error("Data source error ({source_type}): {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV", "Parquet")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file format could not be determined or is not supported.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, ModelError>`.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
