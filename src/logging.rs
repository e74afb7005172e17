//! Logging setup for the command line tools
//!
//! JSON output to STDERR by default, so STDOUT stays free for results. The
//! filter is taken from `ARMATURE_LOG_LEVEL`, then `RUST_LOG`, then the
//! configured level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Plain,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    level: String,
    format: LogFormat,
}

impl LogConfig {
    /// Create the default configuration: JSON at `warn`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level used when no environment filter is present
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn filter(&self) -> EnvFilter {
        std::env::var("ARMATURE_LOG_LEVEL")
            .ok()
            .and_then(|filter| EnvFilter::try_new(filter).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber.
    ///
    /// Does nothing when a subscriber is already installed.
    pub fn init(self) {
        let filter = self.filter();
        let registry = tracing_subscriber::registry().with(filter);

        let result = match self.format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Plain => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };
        if result.is_err() {
            tracing::debug!("Subscriber already installed");
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = LogConfig::new().level("debug").format(LogFormat::Plain);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Plain);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        LogConfig::new().init();
        LogConfig::new().init();
    }
}
