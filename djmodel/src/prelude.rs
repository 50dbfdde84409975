//! Prelude for commonly used types and traits in djmodel.

pub use crate::analyzers::{
    Analyzer, AnalyzerOutcome, Constraint, FieldDecision, FieldType, InferredModel,
    TypeInferenceEngine,
};
pub use crate::casing::ColumnCasing;
pub use crate::dataset::{Column, ColumnKind, Dataset};
pub use crate::error::{ModelError, Result};
pub use crate::formatters::{DjangoFormatter, FormatterConfig, JsonFormatter, ModelFormatter};
pub use crate::generator::{generate_model, ModelConfig};
pub use crate::sources::{CsvOptions, DataFormat, FileSource};
