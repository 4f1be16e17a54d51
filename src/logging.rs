//! MedOps logging setup.
//!
//! Structured logging via the tracing crate, with configurable level and
//! output format. Each entry point (service process, smoke runner, plain
//! CLI) has its own defaults.

use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to output
    pub level: Level,
    /// Enable colored output
    pub color: bool,
    /// Show timestamps
    pub show_timestamps: bool,
    /// Show target/module name
    pub show_target: bool,
    /// Enable JSON format for machine parsing
    pub json_format: bool,
    /// Enable span events for tracing
    pub enable_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            color: true,
            show_timestamps: false,
            show_target: false,
            json_format: false,
            enable_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Create config for different application modes
    pub fn for_mode(mode: ApplicationMode) -> Self {
        match mode {
            ApplicationMode::Service => Self {
                level: Level::INFO,
                color: false, // long-running process, logs are usually collected
                show_timestamps: true,
                show_target: true,
                json_format: false,
                enable_spans: true,
            },
            ApplicationMode::SmokeTest => Self {
                level: Level::WARN, // keep ✓/✗ report output readable
                color: true,
                show_timestamps: false,
                show_target: false,
                json_format: false,
                enable_spans: false,
            },
            ApplicationMode::Cli => Self {
                level: Level::INFO,
                color: true,
                show_timestamps: false,
                show_target: false,
                json_format: false,
                enable_spans: false,
            },
        }
    }

    /// Create config from CLI arguments
    pub fn from_args(quiet: bool, verbose: bool, json: bool) -> Self {
        use std::io::IsTerminal;

        let level = if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            Level::INFO
        };

        Self {
            level,
            color: !quiet && !json && std::io::stdout().is_terminal(),
            show_timestamps: verbose || json,
            show_target: verbose,
            json_format: json,
            enable_spans: verbose,
        }
    }
}

/// Application modes with different logging requirements
#[derive(Debug, Clone, Copy)]
pub enum ApplicationMode {
    /// Long-running HTTP/WebSocket service process
    Service,
    /// Smoke-suite runner - quiet logs, loud report
    SmokeTest,
    /// Plain CLI (migrate/seed) - user-friendly output
    Cli,
}

/// Initialize the logging system
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("medops={}", config.level)));

    let registry = Registry::default().with(env_filter);

    if config.json_format {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(config.enable_spans)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stdout);
        json_layer.with_subscriber(registry).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(config.show_target)
            .with_level(true)
            .with_ansi(config.color)
            .with_writer(io::stdout);

        if config.show_timestamps {
            fmt_layer
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_subscriber(registry)
                .init();
        } else {
            fmt_layer.with_subscriber(registry).init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json_format);
    }

    #[test]
    fn test_service_mode_shows_timestamps() {
        let config = LoggingConfig::for_mode(ApplicationMode::Service);
        assert!(config.show_timestamps);
        assert!(config.show_target);
        assert!(!config.color);
    }

    #[test]
    fn test_smoke_mode_is_quiet() {
        let config = LoggingConfig::for_mode(ApplicationMode::SmokeTest);
        assert_eq!(config.level, Level::WARN);
    }

    #[test]
    fn test_from_args_verbose() {
        let config = LoggingConfig::from_args(false, true, false);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.show_target);
    }

    #[test]
    fn test_from_args_quiet_beats_default() {
        let config = LoggingConfig::from_args(true, false, false);
        assert_eq!(config.level, Level::ERROR);
        assert!(!config.color);
    }
}
