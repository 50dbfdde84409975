//! Command-line front end for djmodel.
//!
//! Loads a data file, generates the model declaration and returns it as text; the
//! `djmodel` binary decides whether it goes to stdout or a file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use djmodel::casing::ColumnCasing;
use djmodel::generator::{generate_model, generate_model_json, ModelConfig};
use djmodel::logging::setup::LoggingConfig;
use djmodel::sources::{CsvOptions, DataFormat, FileSource};
use tracing::{debug, Level};

/// Input formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Csv,
    Parquet,
    Json,
}

impl From<InputFormat> for DataFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Csv => DataFormat::Csv,
            InputFormat::Parquet => DataFormat::Parquet,
            InputFormat::Json => DataFormat::Json,
        }
    }
}

/// Generate a Django model declaration from a CSV, Parquet or JSON file.
#[derive(Parser, Debug)]
#[command(name = "djmodel", author, version, about, long_about = None)]
pub struct Args {
    /// Data file to read
    pub input: PathBuf,

    /// Input format; detected from the extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// CSV field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// The CSV file has no header row
    #[arg(long)]
    pub no_header: bool,

    /// Field name casing: snake, camel, anything else keeps labels
    #[arg(long)]
    pub casing: Option<String>,

    /// Spaces before each field line
    #[arg(long)]
    pub indent: Option<usize>,

    /// Leave out the hint comments
    #[arg(long)]
    pub no_hints: bool,

    /// Class name of the model
    #[arg(long)]
    pub model_name: Option<String>,

    /// Keep field names that are not valid Python identifiers
    #[arg(long)]
    pub keep_names: bool,

    /// Write the declaration to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the inferred fields as JSON
    #[arg(long)]
    pub json: bool,

    /// JSON file with generation options; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Logging setup for the requested verbosity.
    pub fn logging_config(&self) -> LoggingConfig {
        let level = match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        };
        LoggingConfig::default()
            .with_djmodel_level(level)
            .with_json_format(self.log_json)
    }

    /// Generation options from `--config` with command-line overrides applied.
    pub fn model_config(&self) -> Result<ModelConfig> {
        let mut config = match &self.config {
            Some(path) => ModelConfig::from_json_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => ModelConfig::default(),
        };

        if let Some(casing) = &self.casing {
            config = config.with_casing(ColumnCasing::from(casing.clone()));
        }
        if let Some(indent) = self.indent {
            config = config.with_indent(indent);
        }
        if self.no_hints {
            config = config.with_hints(false);
        }
        if let Some(name) = &self.model_name {
            config = config.with_model_name(name.clone());
        }
        if self.keep_names {
            config = config.with_sanitize_names(false);
        }

        config.validate()?;
        Ok(config)
    }

    /// The file source described by the input flags.
    pub fn file_source(&self) -> Result<FileSource> {
        let mut source = FileSource::new(&self.input);
        if let Some(format) = self.format {
            source = source.with_format(format.into());
        }

        let mut csv: CsvOptions = source.csv_options().clone();
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                bail!("delimiter must be a single ASCII character, got {delimiter:?}");
            }
            csv = csv.with_delimiter(delimiter as u8);
        }
        if self.no_header {
            csv = csv.with_header(false);
        }
        Ok(source.with_csv_options(csv))
    }
}

/// Loads the input file and renders the model declaration.
pub async fn run(args: &Args) -> Result<String> {
    let config = args.model_config()?;
    let source = args.file_source()?;
    debug!(?config, "Resolved configuration");

    let batch = source
        .load()
        .await
        .with_context(|| format!("reading {}", args.input.display()))?;

    let rendered = if args.json {
        generate_model_json(&batch, &config)
    } else {
        generate_model(&batch, &config)
    };
    rendered.context("generating model")
}
