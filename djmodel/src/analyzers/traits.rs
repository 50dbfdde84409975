//! Core analyzer trait.

use std::fmt::Debug;

use super::errors::AnalyzerResult;
use super::types::AnalyzerOutcome;
use crate::dataset::Column;

/// An inspection of one column that reports advisory facts about it.
///
/// Analyzers are pure: the same column always yields the same outcome and nothing
/// outside the returned value changes. The engine runs a kind's analyzers in their
/// declared order, which only matters for field overrides (the last one wins) and
/// for the order constraints and hints are rendered in.
///
/// # Example
///
/// ```rust
/// use djmodel::analyzers::{Analyzer, AnalyzerOutcome, AnalyzerResult};
/// use djmodel::dataset::Column;
///
/// #[derive(Debug)]
/// struct RowCountHint;
///
/// impl Analyzer for RowCountHint {
///     fn name(&self) -> &str {
///         "row_count"
///     }
///
///     fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
///         Ok(AnalyzerOutcome::empty().with_hint(format!("{} rows", column.len())))
///     }
/// }
/// ```
pub trait Analyzer: Send + Sync + Debug {
    /// Returns the name of this analyzer.
    ///
    /// Used for identification in logs.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer reports.
    fn description(&self) -> &str {
        ""
    }

    /// Inspects the column and reports what it found.
    ///
    /// Errors from the column's statistics are propagated unchanged.
    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome>;
}
