//! Column analyzers and the field inference engine.
//!
//! An analyzer inspects one column and reports what it learned as an
//! [`AnalyzerOutcome`]: an optional field override, an optional keyword
//! constraint and an optional reviewer hint. The [`TypeInferenceEngine`] runs the
//! analyzers registered for each column kind and folds their outcomes into a
//! [`FieldDecision`].
//!
//! ## Available Analyzers
//!
//! - **Length** (`max_col_str_length`): suggests `max_length` for text fields
//! - **Completeness** (`has_nans`, `can_be_null`): reports missing values and adds `null=True`
//! - **Numeric** (`numeric_stats`, `precise_int_field`): reports min/max/mean and narrows integer fields
//! - **Unsupported** (`unsupported_kind`): flags column kinds without a mapping
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use djmodel::analyzers::{Constraint, TypeInferenceEngine};
//!
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![Field::new("city", DataType::Utf8, true)])),
//!     vec![Arc::new(StringArray::from(vec![Some("Lyon"), None, Some("Montpellier")])) as ArrayRef],
//! )
//! .unwrap();
//!
//! let model = TypeInferenceEngine::new().infer(&batch).unwrap();
//! let city = model.field("city").unwrap();
//! assert_eq!(city.constraints, [Constraint::max_length(20)]);
//! assert_eq!(city.hints[0], "max length was 11");
//! ```

pub mod basic;
pub mod errors;
pub mod inference;
pub mod traits;
pub mod types;

pub use basic::{
    CanBeNullAnalyzer, HasNansAnalyzer, MaxStrLengthAnalyzer, NumericStatsAnalyzer,
    PreciseIntFieldAnalyzer, UnsupportedKindAnalyzer,
};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use inference::{
    FieldDecision, InferenceConfig, InferredModel, KindRegistry, KindRule, TypeInferenceEngine,
    TypeInferenceEngineBuilder,
};
pub use traits::Analyzer;
pub use types::{AnalyzerOutcome, Constraint, ConstraintValue, FieldType};
