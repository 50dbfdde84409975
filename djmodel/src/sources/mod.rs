//! File loading into a single Arrow record batch.
//!
//! Model generation needs the whole dataset in memory, so a [`FileSource`] reads a
//! CSV, Parquet or newline-delimited JSON file through DataFusion and concatenates
//! every batch into one [`RecordBatch`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use djmodel::sources::{CsvOptions, FileSource};
//!
//! # async fn example() -> djmodel::Result<()> {
//! let batch = FileSource::new("data/orders.csv").load().await?;
//!
//! let semicolons = FileSource::new("data/export.txt")
//!     .with_csv_options(CsvOptions::default().with_delimiter(b';'))
//!     .load()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{ModelError, Result};

/// Input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Delimited text, `.csv` or `.tsv`
    Csv,
    /// Apache Parquet
    Parquet,
    /// Newline-delimited JSON, `.json` or `.ndjson`
    Json,
}

impl DataFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ModelError::UnsupportedFormat(format!(
                    "{} has no file extension, pass the format explicitly",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "csv" | "tsv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            "json" | "ndjson" | "jsonl" => Ok(Self::Json),
            other => Err(ModelError::UnsupportedFormat(format!(
                "unrecognised extension '.{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Json => "json",
        }
    }
}

impl FromStr for DataFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "tsv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            "json" | "ndjson" | "jsonl" => Ok(Self::Json),
            other => Err(ModelError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for configuring CSV file reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Maximum records to read for schema inference
    pub schema_infer_max_records: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            schema_infer_max_records: 1000,
        }
    }
}

impl CsvOptions {
    /// Tab separated values with a header row.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_schema_infer_max_records(mut self, records: usize) -> Self {
        self.schema_infer_max_records = records;
        self
    }
}

/// A single data file read through DataFusion.
///
/// The format is detected from the extension unless set with
/// [`FileSource::with_format`]. `.tsv` files default to a tab delimiter.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Option<DataFormat>,
    csv: CsvOptions,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_tsv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));

        Self {
            path,
            format: None,
            csv: if is_tsv {
                CsvOptions::tsv()
            } else {
                CsvOptions::default()
            },
        }
    }

    /// Forces the format instead of detecting it from the extension.
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn csv_options(&self) -> &CsvOptions {
        &self.csv
    }

    /// The explicit format, or the one detected from the extension.
    pub fn format(&self) -> Result<DataFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => DataFormat::from_path(&self.path),
        }
    }

    /// Reads the whole file into one record batch.
    #[instrument(skip(self), fields(source.path = %self.path.display()))]
    pub async fn load(&self) -> Result<RecordBatch> {
        let format = self.format()?;
        if !self.path.is_file() {
            return Err(ModelError::data_source(
                format.as_str(),
                format!("{} does not exist or is not a file", self.path.display()),
            ));
        }
        let path = self.path.to_str().ok_or_else(|| {
            ModelError::Configuration("Path contains invalid UTF-8".to_string())
        })?;

        info!(
            source.format = %format,
            csv.delimiter = %self.csv.delimiter as char,
            csv.has_header = self.csv.has_header,
            "Loading data file"
        );

        let ctx = SessionContext::new();
        let frame = self
            .read(&ctx, format, path)
            .await
            .map_err(|e| self.read_error(format, e))?;
        let schema = frame.schema().inner().clone();
        let batches = frame
            .collect()
            .await
            .map_err(|e| self.read_error(format, e))?;
        debug!(batches = batches.len(), "Collected record batches");

        let batch = concat_batches(&schema, &batches)?;
        info!(
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "Loaded data file"
        );
        Ok(batch)
    }

    async fn read(
        &self,
        ctx: &SessionContext,
        format: DataFormat,
        path: &str,
    ) -> datafusion::error::Result<DataFrame> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        match format {
            DataFormat::Csv => {
                let options = CsvReadOptions::new()
                    .has_header(self.csv.has_header)
                    .delimiter(self.csv.delimiter)
                    .quote(self.csv.quote)
                    .schema_infer_max_records(self.csv.schema_infer_max_records)
                    .file_extension(&extension);
                ctx.read_csv(path, options).await
            }
            DataFormat::Parquet => {
                let mut options = ParquetReadOptions::default();
                options.file_extension = &extension;
                ctx.read_parquet(path, options).await
            }
            DataFormat::Json => {
                let options = NdJsonReadOptions::default().file_extension(&extension);
                ctx.read_json(path, options).await
            }
        }
    }

    fn read_error(&self, format: DataFormat, err: datafusion::error::DataFusionError) -> ModelError {
        ModelError::data_source_with_source(
            format.as_str(),
            format!("failed to read {}", self.path.display()),
            Box::new(err),
        )
    }
}
