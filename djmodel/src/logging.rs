//! Logging utilities and subscriber setup for djmodel.
//!
//! The library only emits `tracing` events; binaries decide where they go. Model
//! output is written to stdout, so [`setup::init_logging`] always logs to stderr.

/// Maximum length of a column label in log fields.
pub const MAX_LOGGED_LABEL: usize = 64;

/// Truncates a string to at most `max_length` characters for logging.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => format!("{}...(truncated)", &value[..cut]),
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for djmodel's logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for dependencies such as DataFusion
        pub level: Level,
        /// Log level for djmodel components specifically
        pub djmodel_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                djmodel_level: Level::WARN,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::INFO,
                djmodel_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Creates a configuration for JSON logs.
        pub fn structured() -> Self {
            Self {
                level: Level::WARN,
                djmodel_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Sets the log level for dependencies.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for djmodel components.
        pub fn with_djmodel_level(mut self, level: Level) -> Self {
            self.djmodel_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},djmodel={}",
                    self.level.as_str().to_lowercase(),
                    self.djmodel_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global subscriber writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use djmodel::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}
