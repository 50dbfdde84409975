//! Rendering of inferred models.
//!
//! [`DjangoFormatter`] writes the model as a Django class declaration, one field
//! assignment per column with hints as trailing comments. [`JsonFormatter`] emits
//! the same decisions as structured JSON for programmatic consumption.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, BooleanArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use djmodel::analyzers::TypeInferenceEngine;
//! use djmodel::formatters::{DjangoFormatter, FormatterConfig, ModelFormatter};
//!
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![Field::new("active", DataType::Boolean, false)])),
//!     vec![Arc::new(BooleanArray::from(vec![true, false])) as ArrayRef],
//! )
//! .unwrap();
//! let model = TypeInferenceEngine::new().infer(&batch).unwrap();
//!
//! let formatter = DjangoFormatter::with_config(FormatterConfig::default().with_model_name("Account"));
//! assert_eq!(
//!     formatter.format(&model).unwrap(),
//!     "class Account(models.Model):\n    active = models.BooleanField()\n"
//! );
//! ```

use serde::Serialize;

use crate::analyzers::{FieldDecision, InferredModel};
use crate::error::{ModelError, Result};

/// Default class name of the rendered model.
pub const DEFAULT_MODEL_NAME: &str = "DFModel";

/// Options shared by the model formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Spaces before each field line
    pub indent: usize,
    /// Render hints as trailing comments
    pub hints: bool,
    /// Class name of the model
    pub model_name: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            hints: true,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

impl FormatterConfig {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

/// Turns an [`InferredModel`] into text.
///
/// # Examples
///
/// ```rust
/// use djmodel::analyzers::InferredModel;
/// use djmodel::formatters::ModelFormatter;
///
/// struct FieldCount;
///
/// impl ModelFormatter for FieldCount {
///     fn format(&self, model: &InferredModel) -> djmodel::Result<String> {
///         Ok(format!("{} fields", model.len()))
///     }
/// }
/// ```
pub trait ModelFormatter {
    fn format(&self, model: &InferredModel) -> Result<String>;
}

/// Renders a Django `models.Model` class declaration.
///
/// Hints become a trailing `# ` comment joined by `; `. A field without hints gets
/// no comment at all, so no line ends in whitespace.
///
/// ```text
/// class DFModel(models.Model):
///     name = models.CharField(max_length=20) # max length was 11; (!) contains 1 Nones (20.00%)
/// ```
#[derive(Debug, Clone, Default)]
pub struct DjangoFormatter {
    config: FormatterConfig,
}

impl DjangoFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn field_line(&self, field: &FieldDecision) -> String {
        let arguments = field
            .constraints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut line = format!(
            "{:indent$}{} = models.{}({arguments})",
            "",
            field.name,
            field.field_type,
            indent = self.config.indent
        );
        if self.config.hints && !field.hints.is_empty() {
            line.push_str(" # ");
            line.push_str(&field.hints.join("; "));
        }
        line.push('\n');
        line
    }
}

impl ModelFormatter for DjangoFormatter {
    fn format(&self, model: &InferredModel) -> Result<String> {
        let mut output = format!("class {}(models.Model):\n", self.config.model_name);
        for field in model {
            output.push_str(&self.field_line(field));
        }
        Ok(output)
    }
}

#[derive(Serialize)]
struct JsonModel<'a> {
    model_name: &'a str,
    fields: &'a [FieldDecision],
}

/// Serialises the model name and every field decision as JSON.
///
/// Hints are left out when the configuration disables them.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default configuration.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelFormatter for JsonFormatter {
    fn format(&self, model: &InferredModel) -> Result<String> {
        let stripped: Vec<FieldDecision>;
        let fields: &[FieldDecision] = if self.config.hints {
            model.fields()
        } else {
            stripped = model
                .fields()
                .iter()
                .cloned()
                .map(|mut field| {
                    field.hints.clear();
                    field
                })
                .collect();
            &stripped
        };

        let document = JsonModel {
            model_name: &self.config.model_name,
            fields,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|e| ModelError::Serialization(format!("Failed to serialize model: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{Constraint, TypeInferenceEngine};
    use crate::test_fixtures::{batch_of, mixed_batch};
    use arrow::array::{ArrayRef, Int64Array};
    use std::sync::Arc;

    fn mixed_model() -> InferredModel {
        TypeInferenceEngine::new().infer(&mixed_batch()).unwrap()
    }

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert_eq!(config.indent, 4);
        assert!(config.hints);
        assert_eq!(config.model_name, "DFModel");

        let config = config.with_indent(2).with_hints(false).with_model_name("Order");
        assert_eq!(config.indent, 2);
        assert!(!config.hints);
        assert_eq!(config.model_name, "Order");
    }

    #[test]
    fn test_django_formatter() {
        let output = DjangoFormatter::new().format(&mixed_model()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "class DFModel(models.Model):");
        assert_eq!(
            lines[1],
            "    order_id = models.PositiveSmallIntegerField() # min: 1, max: 5, mean: 3.0"
        );
        assert_eq!(
            lines[2],
            "    customer_name = models.CharField(max_length=20) # max length was 11; (!) contains 1 Nones (20.00%)"
        );
        assert_eq!(
            lines[3],
            "    Unit__price = models.FloatField(null=True) # (!) contains 1 Nones (20.00%); min: 1.5, max: 4.0, mean: 2.6875"
        );
        assert_eq!(lines[4], "    is_paid = models.BooleanField()");
        assert_eq!(lines[5], "    created_at = models.DateTimeField(null=True)");
        assert_eq!(lines[6], "    delay = models.DurationField()");
        assert_eq!(
            lines[7],
            "    payload = models.CharField() # Unsupported dtype Binary"
        );
        assert_eq!(lines.len(), 8);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_django_formatter_without_hints() {
        let formatter = DjangoFormatter::with_config(
            FormatterConfig::default()
                .with_hints(false)
                .with_indent(2)
                .with_model_name("Order"),
        );
        let output = formatter.format(&mixed_model()).unwrap();

        assert!(output.starts_with("class Order(models.Model):\n"));
        assert!(!output.contains('#'));
        assert!(output.contains("\n  customer_name = models.CharField(max_length=20)\n"));
    }

    #[test]
    fn test_fields_without_hints_have_no_comment() {
        let output = DjangoFormatter::new().format(&mixed_model()).unwrap();
        assert!(output.contains("\n    is_paid = models.BooleanField()\n"));
        assert!(output.lines().all(|line| !line.ends_with(' ')));
        assert!(!output.contains(" # \n"));
    }

    #[test]
    fn test_multiple_constraints_keep_order() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None]));
        let model = TypeInferenceEngine::new()
            .infer(&batch_of(vec![("2nd", array)]))
            .unwrap();
        assert_eq!(
            model.fields()[0].constraints,
            [Constraint::nullable(), Constraint::db_column("2nd")]
        );

        let output = DjangoFormatter::new().format(&model).unwrap();
        assert!(output.contains(
            "    field_2nd = models.PositiveSmallIntegerField(null=True, db_column='2nd') # "
        ));
    }

    #[test]
    fn test_empty_model() {
        let model = TypeInferenceEngine::new().infer(&batch_of(vec![])).unwrap();
        assert_eq!(
            DjangoFormatter::new().format(&model).unwrap(),
            "class DFModel(models.Model):\n"
        );
    }

    #[test]
    fn test_json_formatter() {
        let output = JsonFormatter::new().format(&mixed_model()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["model_name"], "DFModel");
        assert_eq!(value["fields"].as_array().unwrap().len(), 7);
        assert_eq!(value["fields"][1]["name"], "customer_name");
        assert_eq!(value["fields"][1]["column"], "customer name");
        assert_eq!(value["fields"][1]["field_type"], "CharField");
        assert_eq!(value["fields"][1]["constraints"][0]["name"], "max_length");
        assert_eq!(value["fields"][1]["constraints"][0]["value"], 20);
        assert_eq!(value["fields"][1]["hints"][0], "max length was 11");
    }

    #[test]
    fn test_json_formatter_without_hints() {
        let formatter =
            JsonFormatter::with_config(FormatterConfig::default().with_hints(false)).with_pretty(false);
        let output = formatter.format(&mixed_model()).unwrap();
        assert!(!output.contains('\n'));
        assert!(!output.contains("max length was"));
        assert!(output.contains("\"hints\":[]"));
    }
}
