//! The column capabilities model generation needs from a tabular dataset.
//!
//! The inference engine never touches a concrete data library directly. It asks a
//! [`Dataset`] for its columns in order and each [`Column`] for its kind, its missing
//! value count, the width of its longest rendered value and its numeric summary.
//! The [`record_batch`] submodule implements these capabilities for Arrow record
//! batches.

pub mod record_batch;

use std::fmt;

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

use crate::analyzers::AnalyzerResult;

pub use record_batch::ArrowColumn;

/// Coarse value classification of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Boolean,
    DateTime,
    Duration,
    /// Any other physical type, carrying its display name.
    Unsupported(String),
}

impl ColumnKind {
    /// Classifies an Arrow data type.
    pub fn from_data_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnKind::Text,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnKind::Integer,
            DataType::Float16 | DataType::Float32 | DataType::Float64 => ColumnKind::Float,
            DataType::Boolean => ColumnKind::Boolean,
            DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
                ColumnKind::DateTime
            }
            DataType::Duration(_) => ColumnKind::Duration,
            other => ColumnKind::Unsupported(other.to_string()),
        }
    }

    /// Short name used in logs and hints.
    pub fn name(&self) -> &str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Duration => "duration",
            ColumnKind::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single numeric statistic, keeping integers and floats apart so each prints
/// in its natural form (`42`, `42.0`, `nan`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NumericValue {
    Int(i128),
    Float(f64),
}

impl NumericValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Int(v) => *v as f64,
            NumericValue::Float(v) => *v,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(v) => write!(f, "{v}"),
            NumericValue::Float(v) if v.is_nan() => f.write_str("nan"),
            NumericValue::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "inf" } else { "-inf" })
            }
            NumericValue::Float(v) if *v != 0.0 && !(1e-4..1e16).contains(&v.abs()) => {
                write_exponent(f, *v)
            }
            NumericValue::Float(v) => {
                let rendered = v.to_string();
                if rendered.contains('.') {
                    f.write_str(&rendered)
                } else {
                    write!(f, "{rendered}.0")
                }
            }
        }
    }
}

/// Scientific form with a signed, two-digit exponent: `1e+16`, `2.5e-05`.
fn write_exponent(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let rendered = format!("{v:e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    write!(f, "{mantissa}e{sign}{digits:0>2}")
}

/// Minimum, maximum and mean over the non-missing values of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: NumericValue,
    pub max: NumericValue,
    pub mean: f64,
}

/// Read access to one column of a dataset.
pub trait Column {
    /// Column label as it appears in the dataset.
    fn name(&self) -> &str;

    fn kind(&self) -> ColumnKind;

    /// Number of rows, missing values included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing values. Nulls and float NaNs both count.
    fn null_count(&self) -> usize;

    /// Character length of the longest value once rendered as a string.
    ///
    /// Missing values are rendered too, so they take part in the maximum. An empty
    /// column yields zero.
    fn max_rendered_len(&self) -> AnalyzerResult<usize>;

    /// Numeric summary of the non-missing values, or `None` when there are none.
    ///
    /// Fails with [`crate::analyzers::AnalyzerError::TypeMismatch`] when the values
    /// are not numeric.
    fn numeric_summary(&self) -> AnalyzerResult<Option<NumericSummary>>;
}

/// An ordered collection of named columns.
pub trait Dataset {
    /// Returns every column, in dataset order.
    fn column_views(&self) -> Vec<Box<dyn Column + '_>>;
}
