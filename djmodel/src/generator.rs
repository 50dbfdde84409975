//! One-call model generation from a dataset.
//!
//! [`ModelConfig`] gathers the knobs of a generation run and can be loaded from a
//! partial JSON document. [`generate_model`] infers the fields of a dataset and
//! renders them as a Django model class.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow::array::{ArrayRef, Float64Array};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use djmodel::generator::{generate_model, ModelConfig};
//!
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![Field::new("unitPrice", DataType::Float64, false)])),
//!     vec![Arc::new(Float64Array::from(vec![2.5, 4.0])) as ArrayRef],
//! )
//! .unwrap();
//!
//! let config = ModelConfig::default().with_model_name("Product").with_hints(false);
//! let declaration = generate_model(&batch, &config).unwrap();
//! assert_eq!(
//!     declaration,
//!     "class Product(models.Model):\n    unit_price = models.FloatField()\n"
//! );
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analyzers::{InferredModel, TypeInferenceEngine};
use crate::casing::ColumnCasing;
use crate::dataset::Dataset;
use crate::error::{ModelError, Result};
use crate::formatters::{
    DjangoFormatter, FormatterConfig, JsonFormatter, ModelFormatter, DEFAULT_MODEL_NAME,
};

/// Options of a generation run.
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes:
///
/// ```rust
/// use djmodel::casing::ColumnCasing;
/// use djmodel::generator::ModelConfig;
///
/// let config = ModelConfig::from_json_str(r#"{"col_casing": "camel", "indent": 2}"#).unwrap();
/// assert_eq!(config.col_casing, ColumnCasing::Camel);
/// assert_eq!(config.indent, 2);
/// assert!(config.hints);
/// assert_eq!(config.model_name, "DFModel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Casing of field names: `snake`, `camel`, anything else keeps labels
    pub col_casing: ColumnCasing,
    /// Spaces before each field line
    pub indent: usize,
    /// Render hints as trailing comments
    pub hints: bool,
    /// Class name of the model
    pub model_name: String,
    /// Rewrite field names that are not valid Python identifiers
    pub sanitize_names: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            col_casing: ColumnCasing::Snake,
            indent: 4,
            hints: true,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            sanitize_names: true,
        }
    }
}

impl ModelConfig {
    pub fn with_casing(mut self, casing: ColumnCasing) -> Self {
        self.col_casing = casing;
        self
    }

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

    pub fn with_sanitize_names(mut self, sanitize: bool) -> Self {
        self.sanitize_names = sanitize;
        self
    }

    /// Parses a configuration from JSON; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Checks that the model name can be rendered as a class name.
    pub fn validate(&self) -> Result<()> {
        if !crate::identifier::is_valid_identifier(&self.model_name) {
            return Err(ModelError::Configuration(format!(
                "model name '{}' is not a valid Python identifier",
                self.model_name
            )));
        }
        Ok(())
    }

    /// The inference engine this configuration describes.
    pub fn engine(&self) -> TypeInferenceEngine {
        TypeInferenceEngine::builder()
            .casing(self.col_casing.clone())
            .sanitize_names(self.sanitize_names)
            .build()
    }

    /// The rendering options this configuration describes.
    pub fn formatter_config(&self) -> FormatterConfig {
        FormatterConfig::default()
            .with_indent(self.indent)
            .with_hints(self.hints)
            .with_model_name(self.model_name.clone())
    }
}

/// Infers the fields of every column without rendering them.
#[instrument(skip_all, fields(model = %config.model_name))]
pub fn infer_model<D: Dataset + ?Sized>(dataset: &D, config: &ModelConfig) -> Result<InferredModel> {
    config.validate()?;
    Ok(config.engine().infer(dataset)?)
}

/// Infers and renders a Django model declaration for the dataset.
///
/// The output is a pure function of the dataset and the configuration.
pub fn generate_model<D: Dataset + ?Sized>(dataset: &D, config: &ModelConfig) -> Result<String> {
    let model = infer_model(dataset, config)?;
    let declaration = DjangoFormatter::with_config(config.formatter_config()).format(&model)?;
    info!(
        fields = model.len(),
        model = %config.model_name,
        "Generated model declaration"
    );
    Ok(declaration)
}

/// Infers the fields of the dataset and renders them as JSON.
pub fn generate_model_json<D: Dataset + ?Sized>(
    dataset: &D,
    config: &ModelConfig,
) -> Result<String> {
    let model = infer_model(dataset, config)?;
    JsonFormatter::with_config(config.formatter_config()).format(&model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{batch_of, mixed_batch};
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use std::io::Write;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.col_casing, ColumnCasing::Snake);
        assert_eq!(config.indent, 4);
        assert!(config.hints);
        assert_eq!(config.model_name, "DFModel");
        assert!(config.sanitize_names);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let batch = mixed_batch();
        let config = ModelConfig::default();
        assert_eq!(
            generate_model(&batch, &config).unwrap(),
            generate_model(&batch, &config).unwrap()
        );
    }

    #[test]
    fn test_camel_casing() {
        let config = ModelConfig::default().with_casing(ColumnCasing::Camel);
        let output = generate_model(&mixed_batch(), &config).unwrap();
        assert!(output.contains("    orderId = models.PositiveSmallIntegerField()"));
        assert!(output.contains("    unitPrice = models.FloatField(null=True)"));
        assert!(output.contains("    isPaid = models.BooleanField()"));
    }

    #[test]
    fn test_unknown_casing_keeps_labels() {
        let config = ModelConfig::from_json_str(r#"{"col_casing": "kebab"}"#).unwrap();
        assert_eq!(config.col_casing, ColumnCasing::Preserve);

        let array: ArrayRef = Arc::new(StringArray::from(vec!["x"]));
        let output = generate_model(&batch_of(vec![("RawLabel", array)]), &config).unwrap();
        assert!(output.contains("    RawLabel = models.CharField(max_length=10)"));
    }

    #[test]
    fn test_superscript_label_renders_valid_name() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
        let output = generate_model(&batch_of(vec![("area m²", array)]), &ModelConfig::default())
            .unwrap();
        assert!(output.contains(
            "    area_m_ = models.PositiveSmallIntegerField(db_column='area m²') # min: 1, max: 2, mean: 1.5\n"
        ));
    }

    #[test]
    fn test_invalid_model_name() {
        let config = ModelConfig::default().with_model_name("my model");
        let err = generate_model(&mixed_batch(), &config).unwrap_err();
        assert!(matches!(err, ModelError::Configuration(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ModelConfig::from_json_str("{\"indent\": \"four\"}"),
            Err(ModelError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"hints": false, "model_name": "Order"}}"#).unwrap();

        let config = ModelConfig::from_json_file(file.path()).unwrap();
        assert!(!config.hints);
        assert_eq!(config.model_name, "Order");
        assert_eq!(config.indent, 4);

        let missing = ModelConfig::from_json_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ModelError::Configuration(_))));
    }

    #[test]
    fn test_json_output() {
        let output = generate_model_json(&mixed_batch(), &ModelConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["fields"][0]["name"], "order_id");
    }
}
