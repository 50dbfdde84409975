//! Field type inference from column kinds and analyzer outcomes.
//!
//! Every column kind maps to a default Django field and an ordered list of
//! analyzers. For each column the engine runs that list, lets the last reported
//! field override replace the default, and collects constraints and hints in
//! analyzer order. The column label goes through the configured casing and, when
//! needed, identifier sanitising to become the field name.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Int64Array};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use djmodel::analyzers::{FieldType, TypeInferenceEngine};
//! use djmodel::casing::ColumnCasing;
//!
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![Field::new("Line Count", DataType::Int64, false)])),
//!     vec![Arc::new(Int64Array::from(vec![3, 7, 12])) as ArrayRef],
//! )
//! .unwrap();
//!
//! let engine = TypeInferenceEngine::builder()
//!     .casing(ColumnCasing::Camel)
//!     .build();
//! let model = engine.infer(&batch).unwrap();
//!
//! let field = &model.fields()[0];
//! assert_eq!(field.name, "lineCount");
//! assert_eq!(field.field_type, FieldType::PositiveSmallIntegerField);
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::analyzers::basic::{
    CanBeNullAnalyzer, HasNansAnalyzer, MaxStrLengthAnalyzer, NumericStatsAnalyzer,
    PreciseIntFieldAnalyzer, UnsupportedKindAnalyzer,
};
use crate::analyzers::{Analyzer, AnalyzerResult, Constraint, FieldType};
use crate::casing::ColumnCasing;
use crate::dataset::{Column, ColumnKind, Dataset};
use crate::identifier::sanitize_identifier;
use crate::logging::{truncate_field, MAX_LOGGED_LABEL};

/// Configuration for the type inference engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Casing applied to column labels (default: snake)
    pub casing: ColumnCasing,
    /// Rewrite names that are not valid Python identifiers (default: true)
    pub sanitize_names: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            casing: ColumnCasing::Snake,
            sanitize_names: true,
        }
    }
}

/// Default field and analyzers for one column kind.
#[derive(Debug, Clone)]
pub struct KindRule {
    default_field: FieldType,
    analyzers: Vec<Arc<dyn Analyzer>>,
}

impl KindRule {
    /// A rule with no analyzers.
    pub fn new(default_field: FieldType) -> Self {
        Self {
            default_field,
            analyzers: Vec::new(),
        }
    }

    /// Appends an analyzer; it runs after the ones already registered.
    pub fn with_analyzer(mut self, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzers.push(Arc::new(analyzer));
        self
    }

    pub fn default_field(&self) -> FieldType {
        self.default_field
    }

    pub fn analyzers(&self) -> &[Arc<dyn Analyzer>] {
        &self.analyzers
    }
}

/// Immutable table from column kind to [`KindRule`].
///
/// Kinds without an entry use the fallback rule, which by default renders a
/// `CharField` with a hint naming the unrecognised kind.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    rules: HashMap<ColumnKind, KindRule>,
    fallback: KindRule,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            ColumnKind::Text,
            KindRule::new(FieldType::CharField)
                .with_analyzer(MaxStrLengthAnalyzer::new())
                .with_analyzer(HasNansAnalyzer::new()),
        );
        rules.insert(
            ColumnKind::Integer,
            KindRule::new(FieldType::IntegerField)
                .with_analyzer(CanBeNullAnalyzer::new())
                .with_analyzer(HasNansAnalyzer::new())
                .with_analyzer(NumericStatsAnalyzer::new())
                .with_analyzer(PreciseIntFieldAnalyzer::new()),
        );
        rules.insert(
            ColumnKind::Float,
            KindRule::new(FieldType::FloatField)
                .with_analyzer(CanBeNullAnalyzer::new())
                .with_analyzer(HasNansAnalyzer::new())
                .with_analyzer(NumericStatsAnalyzer::new()),
        );
        rules.insert(ColumnKind::Boolean, KindRule::new(FieldType::BooleanField));
        rules.insert(
            ColumnKind::DateTime,
            KindRule::new(FieldType::DateTimeField).with_analyzer(CanBeNullAnalyzer::new()),
        );
        rules.insert(
            ColumnKind::Duration,
            KindRule::new(FieldType::DurationField).with_analyzer(CanBeNullAnalyzer::new()),
        );

        Self {
            rules,
            fallback: KindRule::new(FieldType::CharField)
                .with_analyzer(UnsupportedKindAnalyzer::new()),
        }
    }
}

impl KindRegistry {
    /// Returns the rule for `kind`, or the fallback rule.
    pub fn rule_for(&self, kind: &ColumnKind) -> &KindRule {
        self.rules.get(kind).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &KindRule {
        &self.fallback
    }
}

/// The inferred field for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecision {
    /// Field name as rendered in the model.
    pub name: String,
    /// Column label in the dataset.
    pub column: String,
    pub kind: ColumnKind,
    pub field_type: FieldType,
    /// Keyword arguments, in analyzer order.
    pub constraints: Vec<Constraint>,
    /// Reviewer hints, in analyzer order.
    pub hints: Vec<String>,
}

/// Inferred fields of a dataset, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferredModel {
    fields: Vec<FieldDecision>,
}

impl InferredModel {
    pub fn fields(&self) -> &[FieldDecision] {
        &self.fields
    }

    /// Looks up a field by its rendered name.
    pub fn field(&self, name: &str) -> Option<&FieldDecision> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a InferredModel {
    type Item = &'a FieldDecision;
    type IntoIter = std::slice::Iter<'a, FieldDecision>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builder for TypeInferenceEngine
pub struct TypeInferenceEngineBuilder {
    config: InferenceConfig,
    registry: KindRegistry,
}

impl TypeInferenceEngineBuilder {
    /// Set the casing applied to column labels
    pub fn casing(mut self, casing: ColumnCasing) -> Self {
        self.config.casing = casing;
        self
    }

    /// Enable or disable identifier sanitising
    pub fn sanitize_names(mut self, enable: bool) -> Self {
        self.config.sanitize_names = enable;
        self
    }

    /// Replace the rule for a kind
    pub fn rule(mut self, kind: ColumnKind, rule: KindRule) -> Self {
        self.registry.rules.insert(kind, rule);
        self
    }

    /// Append an analyzer to a kind's rule, starting from the fallback rule when
    /// the kind has none
    pub fn add_analyzer(mut self, kind: ColumnKind, analyzer: impl Analyzer + 'static) -> Self {
        let fallback = self.registry.fallback.clone();
        let rule = self.registry.rules.entry(kind).or_insert(fallback);
        rule.analyzers.push(Arc::new(analyzer));
        self
    }

    /// Replace the rule used for kinds without an entry
    pub fn fallback(mut self, rule: KindRule) -> Self {
        self.registry.fallback = rule;
        self
    }

    /// Build the TypeInferenceEngine
    pub fn build(self) -> TypeInferenceEngine {
        TypeInferenceEngine {
            config: self.config,
            registry: self.registry,
        }
    }
}

/// Main type inference engine
#[derive(Debug, Clone)]
pub struct TypeInferenceEngine {
    config: InferenceConfig,
    registry: KindRegistry,
}

impl TypeInferenceEngine {
    /// Create a new builder for TypeInferenceEngine
    pub fn builder() -> TypeInferenceEngineBuilder {
        TypeInferenceEngineBuilder {
            config: InferenceConfig::default(),
            registry: KindRegistry::default(),
        }
    }

    /// Create a TypeInferenceEngine with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Infer a field for every column of the dataset, in column order
    #[instrument(skip_all)]
    pub fn infer<D: Dataset + ?Sized>(&self, dataset: &D) -> AnalyzerResult<InferredModel> {
        let columns = dataset.column_views();
        info!(
            columns = columns.len(),
            casing = %self.config.casing,
            "Starting model inference"
        );

        let mut fields = Vec::with_capacity(columns.len());
        let mut seen = HashSet::new();
        for (position, column) in columns.iter().enumerate() {
            let decision = self.infer_column(column.as_ref(), position)?;
            if !seen.insert(decision.name.clone()) {
                warn!(
                    field = %decision.name,
                    column = %truncate_field(&decision.column, MAX_LOGGED_LABEL),
                    "Several columns map to the same field name"
                );
            }
            fields.push(decision);
        }

        info!(fields = fields.len(), "Completed model inference");
        Ok(InferredModel { fields })
    }

    /// Infer the field of a single column; `position` is its index in the dataset
    #[instrument(skip(self, column), fields(column = %column.name()))]
    pub fn infer_column(
        &self,
        column: &dyn Column,
        position: usize,
    ) -> AnalyzerResult<FieldDecision> {
        let kind = column.kind();
        let rule = self.registry.rule_for(&kind);

        let mut field_type = rule.default_field;
        let mut constraints = Vec::new();
        let mut hints = Vec::new();

        for analyzer in &rule.analyzers {
            let outcome = analyzer.analyze(column)?;
            debug!(analyzer = analyzer.name(), ?outcome, "Analyzer finished");

            if let Some(field) = outcome.field_override {
                field_type = field;
            }
            constraints.extend(outcome.constraint);
            hints.extend(outcome.hint);
        }

        let name = self.field_name(column.name(), position, &mut constraints);
        debug!(
            kind = %kind,
            field = %name,
            field_type = field_type.as_str(),
            "Inferred field"
        );

        Ok(FieldDecision {
            name,
            column: column.name().to_string(),
            kind,
            field_type,
            constraints,
            hints,
        })
    }

    fn field_name(&self, label: &str, position: usize, constraints: &mut Vec<Constraint>) -> String {
        let cased = self.config.casing.apply(label);
        let cased = cased.trim();
        if !self.config.sanitize_names {
            return cased.to_string();
        }

        match sanitize_identifier(cased, position) {
            Cow::Borrowed(name) => name.to_string(),
            Cow::Owned(name) => {
                warn!(
                    column = %truncate_field(label, MAX_LOGGED_LABEL),
                    field = %name,
                    "Column label is not a valid identifier, renamed"
                );
                constraints.push(Constraint::db_column(label));
                name
            }
        }
    }
}

impl Default for TypeInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{AnalyzerError, AnalyzerOutcome};
    use crate::test_fixtures::{batch_of, mixed_batch};
    use arrow::array::{ArrayRef, BinaryArray, Int64Array, StringArray};

    #[derive(Debug)]
    struct FixedOverride(FieldType);

    impl Analyzer for FixedOverride {
        fn name(&self) -> &str {
            "fixed_override"
        }

        fn analyze(&self, _column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
            Ok(AnalyzerOutcome::empty().with_field_override(self.0))
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Analyzer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn analyze(&self, column: &dyn Column) -> AnalyzerResult<AnalyzerOutcome> {
            Err(AnalyzerError::invalid_data(format!(
                "cannot reduce {}",
                column.name()
            )))
        }
    }

    #[test]
    fn test_engine_builder() {
        let engine = TypeInferenceEngine::builder()
            .casing(ColumnCasing::Camel)
            .sanitize_names(false)
            .build();

        assert_eq!(engine.config().casing, ColumnCasing::Camel);
        assert!(!engine.config().sanitize_names);
    }

    #[test]
    fn test_default_registry() {
        let registry = KindRegistry::default();
        let names = |kind: ColumnKind| -> Vec<String> {
            registry
                .rule_for(&kind)
                .analyzers()
                .iter()
                .map(|a| a.name().to_string())
                .collect()
        };

        assert_eq!(
            registry.rule_for(&ColumnKind::Text).default_field(),
            FieldType::CharField
        );
        assert_eq!(names(ColumnKind::Text), ["max_col_str_length", "has_nans"]);
        assert_eq!(
            names(ColumnKind::Integer),
            ["can_be_null", "has_nans", "numeric_stats", "precise_int_field"]
        );
        assert_eq!(
            names(ColumnKind::Float),
            ["can_be_null", "has_nans", "numeric_stats"]
        );
        assert!(names(ColumnKind::Boolean).is_empty());
        assert_eq!(names(ColumnKind::DateTime), ["can_be_null"]);
        assert_eq!(names(ColumnKind::Duration), ["can_be_null"]);
        assert_eq!(
            names(ColumnKind::Unsupported("Binary".to_string())),
            ["unsupported_kind"]
        );
    }

    #[test]
    fn test_mixed_dataset() {
        let model = TypeInferenceEngine::new().infer(&mixed_batch()).unwrap();
        let names: Vec<&str> = model.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "order_id",
                "customer_name",
                "Unit__price",
                "is_paid",
                "created_at",
                "delay",
                "payload"
            ]
        );

        let order_id = model.field("order_id").unwrap();
        assert_eq!(order_id.field_type, FieldType::PositiveSmallIntegerField);
        assert!(order_id.constraints.is_empty());
        assert_eq!(order_id.hints, ["min: 1, max: 5, mean: 3.0"]);

        let name = model.field("customer_name").unwrap();
        assert_eq!(name.field_type, FieldType::CharField);
        assert_eq!(name.constraints, [Constraint::max_length(20)]);
        assert_eq!(
            name.hints,
            ["max length was 11", "(!) contains 1 Nones (20.00%)"]
        );

        let price = model.field("Unit__price").unwrap();
        assert_eq!(price.field_type, FieldType::FloatField);
        assert_eq!(price.constraints, [Constraint::nullable()]);
        assert_eq!(
            price.hints,
            [
                "(!) contains 1 Nones (20.00%)",
                "min: 1.5, max: 4.0, mean: 2.6875"
            ]
        );

        let paid = model.field("is_paid").unwrap();
        assert_eq!(paid.field_type, FieldType::BooleanField);
        assert!(paid.constraints.is_empty() && paid.hints.is_empty());

        let created = model.field("created_at").unwrap();
        assert_eq!(created.field_type, FieldType::DateTimeField);
        assert_eq!(created.constraints, [Constraint::nullable()]);

        let delay = model.field("delay").unwrap();
        assert_eq!(delay.field_type, FieldType::DurationField);
        assert!(delay.constraints.is_empty());

        let payload = model.field("payload").unwrap();
        assert_eq!(payload.field_type, FieldType::CharField);
        assert_eq!(payload.hints, ["Unsupported dtype Binary"]);
    }

    #[test]
    fn test_last_override_wins() {
        let engine = TypeInferenceEngine::builder()
            .rule(
                ColumnKind::Integer,
                KindRule::new(FieldType::IntegerField)
                    .with_analyzer(FixedOverride(FieldType::BigIntegerField))
                    .with_analyzer(FixedOverride(FieldType::SmallIntegerField)),
            )
            .build();
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        let model = engine.infer(&batch_of(vec![("n", array)])).unwrap();
        assert_eq!(model.fields()[0].field_type, FieldType::SmallIntegerField);
    }

    #[test]
    fn test_override_replaces_default() {
        let cases = [
            (vec![0i64, 100], FieldType::PositiveSmallIntegerField),
            (vec![-100, 100], FieldType::SmallIntegerField),
            (vec![-3_000_000_000, 3_000_000_000], FieldType::BigIntegerField),
        ];
        for (values, expected) in cases {
            let array: ArrayRef = Arc::new(Int64Array::from(values));
            let model = TypeInferenceEngine::new()
                .infer(&batch_of(vec![("n", array)]))
                .unwrap();
            assert_eq!(model.fields()[0].field_type, expected);
        }
    }

    #[test]
    fn test_added_analyzer_runs_after_builtins() {
        let engine = TypeInferenceEngine::builder()
            .add_analyzer(ColumnKind::Integer, FixedOverride(FieldType::BigIntegerField))
            .build();
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        let model = engine.infer(&batch_of(vec![("n", array)])).unwrap();
        assert_eq!(model.fields()[0].field_type, FieldType::BigIntegerField);
    }

    #[test]
    fn test_add_analyzer_to_unmapped_kind_starts_from_fallback() {
        let engine = TypeInferenceEngine::builder()
            .add_analyzer(
                ColumnKind::Unsupported("Binary".to_string()),
                FixedOverride(FieldType::IntegerField),
            )
            .build();
        let array: ArrayRef = Arc::new(BinaryArray::from(vec![b"x".as_ref()]));
        let model = engine.infer(&batch_of(vec![("blob", array)])).unwrap();
        let field = &model.fields()[0];
        assert_eq!(field.field_type, FieldType::IntegerField);
        assert_eq!(field.hints, ["Unsupported dtype Binary"]);
    }

    #[test]
    fn test_custom_fallback() {
        let engine = TypeInferenceEngine::builder()
            .fallback(KindRule::new(FieldType::BooleanField))
            .build();
        let array: ArrayRef = Arc::new(BinaryArray::from(vec![b"x".as_ref()]));
        let model = engine.infer(&batch_of(vec![("blob", array)])).unwrap();
        assert_eq!(model.fields()[0].field_type, FieldType::BooleanField);
        assert!(model.fields()[0].hints.is_empty());
    }

    #[test]
    fn test_analyzer_errors_propagate() {
        let engine = TypeInferenceEngine::builder()
            .add_analyzer(ColumnKind::Text, Failing)
            .build();
        let array: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
        let err = engine
            .infer(&batch_of(vec![("label", array)]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid data: cannot reduce label");
    }

    #[test]
    fn test_casing_modes() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        let batch = batch_of(vec![("Total Amount", array)]);

        let name = |casing: ColumnCasing| {
            TypeInferenceEngine::builder()
                .casing(casing)
                .sanitize_names(false)
                .build()
                .infer(&batch)
                .unwrap()
                .fields()[0]
                .name
                .clone()
        };
        assert_eq!(name(ColumnCasing::Snake), "Total__amount");
        assert_eq!(name(ColumnCasing::Camel), "totalAmount");
        assert_eq!(name(ColumnCasing::Preserve), "Total Amount");
    }

    #[test]
    fn test_names_are_trimmed() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        let batch = batch_of(vec![("  padded ", array)]);
        let model = TypeInferenceEngine::builder()
            .casing(ColumnCasing::Preserve)
            .build()
            .infer(&batch)
            .unwrap();
        assert_eq!(model.fields()[0].name, "padded");
        assert_eq!(model.fields()[0].column, "  padded ");
    }

    #[test]
    fn test_invalid_names_are_sanitized() {
        let a: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        let b: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        let batch = batch_of(vec![("2020 sales", a), ("class", b)]);
        let model = TypeInferenceEngine::new().infer(&batch).unwrap();

        let sales = &model.fields()[0];
        assert_eq!(sales.name, "field_2020_sales");
        assert_eq!(
            sales.constraints.last(),
            Some(&Constraint::db_column("2020 sales"))
        );

        let class = &model.fields()[1];
        assert_eq!(class.name, "class_field");
        assert_eq!(class.constraints, [Constraint::db_column("class")]);
    }

    #[test]
    fn test_non_identifier_characters_are_sanitized() {
        let a: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
        let b: ArrayRef = Arc::new(Int64Array::from(vec![3, 4]));
        let batch = batch_of(vec![("area m²", a), ("x½", b)]);
        let model = TypeInferenceEngine::new().infer(&batch).unwrap();

        let area = &model.fields()[0];
        assert_eq!(area.name, "area_m_");
        assert_eq!(area.constraints, [Constraint::db_column("area m²")]);

        let half = &model.fields()[1];
        assert_eq!(half.name, "x_");
        assert_eq!(half.constraints, [Constraint::db_column("x½")]);
    }

    #[test]
    fn test_sanitizing_can_be_disabled() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        let batch = batch_of(vec![("2020 sales", array)]);
        let model = TypeInferenceEngine::builder()
            .sanitize_names(false)
            .build()
            .infer(&batch)
            .unwrap();
        assert_eq!(model.fields()[0].name, "2020_sales");
        assert!(model.fields()[0].constraints.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let model = TypeInferenceEngine::new().infer(&batch_of(vec![])).unwrap();
        assert!(model.is_empty());
    }
}
