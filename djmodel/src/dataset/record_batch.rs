//! Arrow implementation of the dataset capabilities.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type,
    Int64Type, Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::{Column, ColumnKind, Dataset, NumericSummary, NumericValue};
use crate::analyzers::{AnalyzerError, AnalyzerResult};

/// How missing values are rendered when measuring string widths.
const MISSING_REPR: &str = "nan";

/// A named Arrow array viewed as a dataset column.
#[derive(Debug, Clone)]
pub struct ArrowColumn<'a> {
    name: &'a str,
    array: &'a ArrayRef,
}

impl<'a> ArrowColumn<'a> {
    pub fn new(name: &'a str, array: &'a ArrayRef) -> Self {
        Self { name, array }
    }

    fn nan_count(&self) -> usize {
        let array = self.array.as_ref();
        match array.data_type() {
            DataType::Float16 => array
                .as_primitive::<Float16Type>()
                .iter()
                .flatten()
                .filter(|v| v.is_nan())
                .count(),
            DataType::Float32 => array
                .as_primitive::<Float32Type>()
                .iter()
                .flatten()
                .filter(|v| v.is_nan())
                .count(),
            DataType::Float64 => array
                .as_primitive::<Float64Type>()
                .iter()
                .flatten()
                .filter(|v| v.is_nan())
                .count(),
            _ => 0,
        }
    }
}

impl Column for ArrowColumn<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> ColumnKind {
        ColumnKind::from_data_type(self.array.data_type())
    }

    fn len(&self) -> usize {
        self.array.len()
    }

    fn null_count(&self) -> usize {
        self.array.null_count() + self.nan_count()
    }

    fn max_rendered_len(&self) -> AnalyzerResult<usize> {
        let options = FormatOptions::default().with_null(MISSING_REPR);
        let formatter = ArrayFormatter::try_new(self.array.as_ref(), &options)?;

        let mut max_len = 0;
        for idx in 0..self.array.len() {
            let rendered = formatter.value(idx).try_to_string()?;
            max_len = max_len.max(rendered.chars().count());
        }
        Ok(max_len)
    }

    fn numeric_summary(&self) -> AnalyzerResult<Option<NumericSummary>> {
        let array = self.array.as_ref();
        let summary = match array.data_type() {
            DataType::Int8 => integer_summary::<Int8Type>(array),
            DataType::Int16 => integer_summary::<Int16Type>(array),
            DataType::Int32 => integer_summary::<Int32Type>(array),
            DataType::Int64 => integer_summary::<Int64Type>(array),
            DataType::UInt8 => integer_summary::<UInt8Type>(array),
            DataType::UInt16 => integer_summary::<UInt16Type>(array),
            DataType::UInt32 => integer_summary::<UInt32Type>(array),
            DataType::UInt64 => integer_summary::<UInt64Type>(array),
            DataType::Float16 => float_summary::<Float16Type>(array),
            DataType::Float32 => float_summary::<Float32Type>(array),
            DataType::Float64 => float_summary::<Float64Type>(array),
            other => {
                return Err(AnalyzerError::type_mismatch(
                    self.name,
                    "numeric",
                    other.to_string(),
                ))
            }
        };
        Ok(summary)
    }
}

fn integer_summary<T>(array: &dyn Array) -> Option<NumericSummary>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i128>,
{
    let mut extremes: Option<(i128, i128)> = None;
    let mut sum = 0f64;
    let mut count = 0usize;

    for value in array.as_primitive::<T>().iter().flatten() {
        let value: i128 = value.into();
        extremes = Some(match extremes {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
        sum += value as f64;
        count += 1;
    }

    extremes.map(|(min, max)| NumericSummary {
        min: NumericValue::Int(min),
        max: NumericValue::Int(max),
        mean: sum / count as f64,
    })
}

fn float_summary<T>(array: &dyn Array) -> Option<NumericSummary>
where
    T: ArrowPrimitiveType,
    T::Native: Into<f64>,
{
    let mut extremes: Option<(f64, f64)> = None;
    let mut sum = 0f64;
    let mut count = 0usize;

    for value in array.as_primitive::<T>().iter().flatten() {
        let value: f64 = value.into();
        if value.is_nan() {
            continue;
        }
        extremes = Some(match extremes {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
        sum += value;
        count += 1;
    }

    extremes.map(|(min, max)| NumericSummary {
        min: NumericValue::Float(min),
        max: NumericValue::Float(max),
        mean: sum / count as f64,
    })
}

impl Dataset for RecordBatch {
    fn column_views(&self) -> Vec<Box<dyn Column + '_>> {
        self.schema_ref()
            .fields()
            .iter()
            .zip(self.columns())
            .map(|(field, array)| {
                Box::new(ArrowColumn::new(field.name(), array)) as Box<dyn Column + '_>
            })
            .collect()
    }
}
