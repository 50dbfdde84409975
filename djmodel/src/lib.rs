//! # djmodel - Django models from tabular data
//!
//! djmodel looks at the columns of a dataset and writes a first draft of the Django
//! model that would store it. Each column's physical type selects a default field
//! and a list of analyzers; the analyzers narrow the field, add keyword arguments
//! such as `null=True` or `max_length=30`, and leave hints for the reviewer.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use djmodel::prelude::*;
//!
//! # fn main() -> djmodel::Result<()> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("OrderId", DataType::Int64, false),
//!     Field::new("customer", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema,
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
//!         Arc::new(StringArray::from(vec![Some("Ada"), None, Some("Grace")])),
//!     ],
//! )?;
//!
//! let declaration = generate_model(&batch, &ModelConfig::default())?;
//! assert_eq!(
//!     declaration,
//!     "class DFModel(models.Model):\n\
//!      \x20   Order_id = models.PositiveSmallIntegerField() # min: 1, max: 3, mean: 2.0\n\
//!      \x20   customer = models.CharField(max_length=10) # max length was 5; (!) contains 1 Nones (33.33%)\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading files
//!
//! [`sources::FileSource`] reads CSV, Parquet and newline-delimited JSON files
//! through DataFusion:
//!
//! ```rust,no_run
//! use djmodel::prelude::*;
//!
//! # async fn example() -> djmodel::Result<()> {
//! let batch = FileSource::new("orders.csv").load().await?;
//! println!("{}", generate_model(&batch, &ModelConfig::default())?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`casing`**: `snake_case` and `lowerCamelCase` transforms for column labels
//! - **`dataset`**: the column capabilities inference needs, implemented for Arrow
//! - **`analyzers`**: per-column analyzers and the type inference engine
//! - **`identifier`**: Python identifier checks for generated names
//! - **`formatters`**: Django and JSON renderers
//! - **`generator`**: `ModelConfig` and one-call generation
//! - **`sources`**: file loading through DataFusion
//! - **`logging`**: subscriber setup for binaries

pub mod analyzers;
pub mod casing;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod generator;
pub mod identifier;
pub mod logging;
pub mod prelude;
pub mod sources;

#[cfg(test)]
mod test_fixtures;

pub use error::{ModelError, Result};
