//! Value types produced by analyzers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Django model field classes the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    CharField,
    IntegerField,
    PositiveSmallIntegerField,
    SmallIntegerField,
    BigIntegerField,
    FloatField,
    BooleanField,
    DateTimeField,
    DurationField,
}

impl FieldType {
    /// The class name inside `django.db.models`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::CharField => "CharField",
            FieldType::IntegerField => "IntegerField",
            FieldType::PositiveSmallIntegerField => "PositiveSmallIntegerField",
            FieldType::SmallIntegerField => "SmallIntegerField",
            FieldType::BigIntegerField => "BigIntegerField",
            FieldType::FloatField => "FloatField",
            FieldType::BooleanField => "BooleanField",
            FieldType::DateTimeField => "DateTimeField",
            FieldType::DurationField => "DurationField",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword argument value, rendered as a Python literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintValue::Bool(true) => f.write_str("True"),
            ConstraintValue::Bool(false) => f.write_str("False"),
            ConstraintValue::Int(v) => write!(f, "{v}"),
            ConstraintValue::Str(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

/// A field option such as `null=True` or `max_length=30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub value: ConstraintValue,
}

impl Constraint {
    pub fn new(name: impl Into<String>, value: ConstraintValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// `null=True`
    pub fn nullable() -> Self {
        Self::new("null", ConstraintValue::Bool(true))
    }

    /// `max_length=<length>`
    pub fn max_length(length: i64) -> Self {
        Self::new("max_length", ConstraintValue::Int(length))
    }

    /// `db_column='<column>'`
    pub fn db_column(column: impl Into<String>) -> Self {
        Self::new("db_column", ConstraintValue::Str(column.into()))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The advisory facts one analyzer reports about one column.
///
/// Every fact is optional; an analyzer with nothing to say returns
/// [`AnalyzerOutcome::empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutcome {
    /// Field class that should replace the kind's default.
    pub field_override: Option<FieldType>,
    /// Field option to render as a keyword argument.
    pub constraint: Option<Constraint>,
    /// Free-text note for reviewers.
    pub hint: Option<String>,
}

impl AnalyzerOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_field_override(mut self, field: FieldType) -> Self {
        self.field_override = Some(field);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.field_override.is_none() && self.constraint.is_none() && self.hint.is_none()
    }
}
