//! Logging utilities and configuration for smart-text.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application, optionally through [`setup::init_logging`].

/// Logging configuration for the fit drivers.
///
/// Raw column values are never logged: in name columns they are personal data.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether to log every column decision in detail
    pub log_decisions: bool,
    /// Whether to log each merged partition
    pub log_partitions: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_decisions: true,
            log_partitions: false,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            log_decisions: true,
            log_partitions: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            log_decisions: false,
            log_partitions: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }
}

/// Macro for conditional decision logging.
#[macro_export]
macro_rules! log_decision {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_decisions {
            tracing::info!($($arg)*);
        }
    };
}

/// Macro for conditional per-partition logging.
#[macro_export]
macro_rules! log_partition {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_partitions {
            tracing::debug!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` characters.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => format!("{}...(truncated)", &value[..cut]),
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for smart-text's logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for smart-text components specifically
        pub smart_text_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                smart_text_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                smart_text_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                smart_text_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for smart-text components.
        pub fn with_smart_text_level(mut self, level: Level) -> Self {
            self.smart_text_level = level;
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
                    "{},smart_text={}",
                    self.level.as_str().to_lowercase(),
                    self.smart_text_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use smart_text::logging::setup::{LoggingConfig, init_logging};
    ///
    /// let config = LoggingConfig::development()
    ///     .with_json_format(true);
    /// init_logging(config).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert!(config.log_decisions);
        assert!(!config.log_partitions);
        assert_eq!(config.max_field_length, 256);
    }

    #[test]
    fn test_log_config_production() {
        let config = LogConfig::production();
        assert!(!config.log_decisions);
        assert_eq!(config.max_field_length, 128);
    }

    #[test]
    fn test_log_config_verbose() {
        let config = LogConfig::verbose();
        assert!(config.log_decisions);
        assert!(config.log_partitions);
        assert_eq!(config.max_field_length, 1024);
    }

    #[test]
    fn test_log_config_balanced() {
        let config = LogConfig::balanced();
        assert!(config.log_decisions);
        assert!(!config.log_partitions);
        assert_eq!(config.max_field_length, 256);
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text that should be truncated", 10),
            "this is a ...(truncated)"
        );
        assert_eq!(truncate_field("Zoë Ångström", 3), "Zoë...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        let config = LoggingConfig::default();
        assert_eq!(config.env_filter(), "info,smart_text=debug");
        let custom = LoggingConfig::production().with_env_filter("smart_text=trace");
        assert_eq!(custom.env_filter(), "smart_text=trace");
    }
}
