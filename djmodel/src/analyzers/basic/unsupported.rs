//! Fallback analyzer for column kinds the generator has no mapping for.

use crate::analyzers::{Analyzer, AnalyzerOutcome, AnalyzerResult};
use crate::dataset::Column;

/// Notes the unrecognised kind so a reviewer can pick the field by hand.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedKindAnalyzer;

impl UnsupportedKindAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for UnsupportedKindAnalyzer {
    fn name(&self) -> &str {
        "unsupported_kind"
    }

    fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
        Ok(AnalyzerOutcome::empty().with_hint(format!("Unsupported dtype {}", column.kind())))
    }
}
