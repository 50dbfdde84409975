//! Built-in column analyzers.
//!
//! These are the analyzers the default kind registry wires up. Each one looks at a
//! single column and reports at most one field override, one constraint and one
//! hint. They also serve as reference implementations for custom analyzers.

mod completeness;
mod length;
mod numeric;
mod unsupported;

pub use completeness::{CanBeNullAnalyzer, HasNansAnalyzer};
pub use length::MaxStrLengthAnalyzer;
pub use numeric::{NumericStatsAnalyzer, PreciseIntFieldAnalyzer};
pub use unsupported::UnsupportedKindAnalyzer;
