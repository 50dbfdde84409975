//! Analyzers built on a numeric column's min, max and mean.

use tracing::{debug, instrument};

use crate::analyzers::{Analyzer, AnalyzerOutcome, AnalyzerResult, FieldType};
use crate::dataset::{Column, NumericValue};

/// Upper bound of the small integer fields.
const SMALL_MAX: f64 = 32768.0;
/// Lower bound of the signed small integer field.
const SMALL_MIN: f64 = -32768.0;

/// Reports min, max and mean as a hint, e.g. `min: 0, max: 10, mean: 4.5`.
///
/// A column without any non-missing value reports `nan` for all three.
#[derive(Debug, Clone, Default)]
pub struct NumericStatsAnalyzer;

impl NumericStatsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for NumericStatsAnalyzer {
    fn name(&self) -> &str {
        "numeric_stats"
    }

    fn description(&self) -> &str {
        "Reports min, max and mean of a numeric column"
    }

    #[instrument(skip_all, fields(analyzer = "numeric_stats", column = %column.name()))]
    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        let nan = NumericValue::Float(f64::NAN);
        let (min, max, mean) = match column.numeric_summary()? {
            Some(summary) => (summary.min, summary.max, NumericValue::Float(summary.mean)),
            None => (nan, nan, nan),
        };

        Ok(AnalyzerOutcome::empty().with_hint(format!("min: {min}, max: {max}, mean: {mean}")))
    }
}

/// Picks the narrowest integer field that holds every value of the column.
///
/// | range of values                         | field                       |
/// |-----------------------------------------|-----------------------------|
/// | within `[0, 32768]`                     | `PositiveSmallIntegerField` |
/// | within `[-32768, 32768]`                | `SmallIntegerField`         |
/// | any value outside the 32-bit signed range | `BigIntegerField`         |
/// | otherwise, or no values at all          | `IntegerField`              |
#[derive(Debug, Clone, Default)]
pub struct PreciseIntFieldAnalyzer;

impl PreciseIntFieldAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Maps an observed `[min, max]` range to an integer field.
    pub fn field_for_range(min: f64, max: f64) -> FieldType {
        if min >= 0.0 && max <= SMALL_MAX {
            FieldType::PositiveSmallIntegerField
        } else if min >= SMALL_MIN && max <= SMALL_MAX {
            FieldType::SmallIntegerField
        } else if min < f64::from(i32::MIN) || max > f64::from(i32::MAX) {
            FieldType::BigIntegerField
        } else {
            FieldType::IntegerField
        }
    }
}

impl Analyzer for PreciseIntFieldAnalyzer {
    fn name(&self) -> &str {
        "precise_int_field"
    }

    fn description(&self) -> &str {
        "Narrows the integer field to the observed value range"
    }

    #[instrument(skip_all, fields(analyzer = "precise_int_field", column = %column.name()))]
    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        let field = match column.numeric_summary()? {
            Some(summary) => {
                Self::field_for_range(summary.min.as_f64(), summary.max.as_f64())
            }
            None => FieldType::IntegerField,
        };
        debug!(field = field.as_str(), "Selected integer field");

        Ok(AnalyzerOutcome::empty().with_field_override(field))
    }
}
