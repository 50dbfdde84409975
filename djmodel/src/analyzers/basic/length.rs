//! String width analyzer for text columns.

use tracing::{debug, instrument};

use crate::analyzers::{Analyzer, AnalyzerError, AnalyzerOutcome, AnalyzerResult, Constraint};
use crate::dataset::Column;

const DEFAULT_HEADROOM: f64 = 1.3;
const DEFAULT_STEP: u32 = 10;

/// Derives a `max_length` for a text column from its longest rendered value.
///
/// The observed width is scaled by a headroom factor and rounded up to the next
/// multiple of a step: with the defaults (1.3 and 10) a longest value of 23
/// characters gives `max_length=30`. Missing values are rendered as `nan` and take
/// part in the maximum.
#[derive(Debug, Clone)]
pub struct MaxStrLengthAnalyzer {
    headroom: f64,
    step: u32,
}

impl Default for MaxStrLengthAnalyzer {
    fn default() -> Self {
        Self {
            headroom: DEFAULT_HEADROOM,
            step: DEFAULT_STEP,
        }
    }
}

impl MaxStrLengthAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the factor the observed width is multiplied by.
    pub fn with_headroom(mut self, headroom: f64) -> AnalyzerResult<Self> {
        if !headroom.is_finite() || headroom <= 0.0 {
            return Err(AnalyzerError::invalid_config(format!(
                "headroom must be a positive number, got {headroom}"
            )));
        }
        self.headroom = headroom;
        Ok(self)
    }

    /// Sets the multiple the scaled width is rounded up to.
    pub fn with_step(mut self, step: u32) -> AnalyzerResult<Self> {
        if step == 0 {
            return Err(AnalyzerError::invalid_config("step must be at least 1"));
        }
        self.step = step;
        Ok(self)
    }

    /// Rounds an observed width up to the field's `max_length`.
    pub fn suggested_length(&self, max_len: usize) -> i64 {
        let step = f64::from(self.step);
        (max_len as f64 * self.headroom / step).ceil() as i64 * i64::from(self.step)
    }
}

impl Analyzer for MaxStrLengthAnalyzer {
    fn name(&self) -> &str {
        "max_col_str_length"
    }

    fn description(&self) -> &str {
        "Suggests max_length from the longest rendered value"
    }

    #[instrument(skip_all, fields(analyzer = "max_col_str_length", column = %column.name()))]
    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        let max_len = column.max_rendered_len()?;
        let length = self.suggested_length(max_len);
        debug!(max_len, length, "Computed max_length");

        Ok(AnalyzerOutcome::empty()
            .with_constraint(Constraint::max_length(length))
            .with_hint(format!("max length was {max_len}")))
    }
}
