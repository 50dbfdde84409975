//! Analyzers reporting on missing values.

use tracing::instrument;

use crate::analyzers::{Analyzer, AnalyzerOutcome, AnalyzerResult, Constraint};
use crate::dataset::Column;

/// Reports how many values of a column are missing.
///
/// Emits nothing for a complete column; otherwise a hint with the absolute count
/// and the share of rows, e.g. `(!) contains 2 Nones (20.00%)`.
#[derive(Debug, Clone, Default)]
pub struct HasNansAnalyzer;

impl HasNansAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for HasNansAnalyzer {
    fn name(&self) -> &str {
        "has_nans"
    }

    fn description(&self) -> &str {
        "Counts missing values and reports them as a hint"
    }

    #[instrument(skip_all, fields(analyzer = "has_nans", column = %column.name()))]
    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        let missing = column.null_count();
        if missing == 0 {
            return Ok(AnalyzerOutcome::empty());
        }

        let percentage = missing as f64 / column.len() as f64 * 100.0;
        Ok(AnalyzerOutcome::empty().with_hint(format!(
            "(!) contains {missing} Nones ({percentage:.2}%)"
        )))
    }
}

/// Marks a column nullable (`null=True`) when any of its values is missing.
#[derive(Debug, Clone, Default)]
pub struct CanBeNullAnalyzer;

impl CanBeNullAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for CanBeNullAnalyzer {
    fn name(&self) -> &str {
        "can_be_null"
    }

    fn description(&self) -> &str {
        "Adds null=True when the column has missing values"
    }

    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        if column.null_count() > 0 {
            Ok(AnalyzerOutcome::empty().with_constraint(Constraint::nullable()))
        } else {
            Ok(AnalyzerOutcome::empty())
        }
    }
}
