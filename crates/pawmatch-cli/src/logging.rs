//! Logging setup for the PawMatch CLI.
//!
//! Console output goes to stderr so it never interleaves with the interactive
//! prompt on stdout. File logging is optional and writes a daily-rotated
//! `pawmatch.log` in `~/.pawmatch/logs` unless `PAWMATCH_LOG_DIR` says otherwise.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const LOG_FILE_NAME: &str = "pawmatch.log";

fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(format!("{}/.pawmatch/logs", home))
}

/// Logging configuration for the CLI.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log directory (default: `~/.pawmatch/logs`)
    pub log_dir: PathBuf,
    /// Console log level
    pub console_level: Level,
    /// Enable file logging
    pub file_logging: bool,
    /// Level for the log file
    pub file_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_level: Level::WARN,
            file_logging: false,
            file_level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let log_dir = std::env::var("PAWMATCH_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir());

        let console_level = std::env::var("PAWMATCH_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::WARN);

        let file_logging = std::env::var("PAWMATCH_LOG_FILE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            log_dir,
            console_level,
            file_logging,
            file_level: Level::INFO,
        }
    }

    /// Create from application configuration, falling back to the environment.
    pub fn from_config(log_dir: Option<String>, file_logging: bool, level: String) -> Self {
        let env = Self::from_env();
        let log_dir = log_dir.map(PathBuf::from).unwrap_or(env.log_dir);
        let level = level.parse().unwrap_or(env.console_level);

        Self {
            log_dir,
            console_level: level,
            file_logging: file_logging || env.file_logging,
            file_level: if level > Level::INFO { level } else { Level::INFO },
        }
    }
}

/// Keeps the non-blocking file writer alive; dropping it flushes buffered output.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured console level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
    layers.push(Box::new(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(console_filter),
    ));

    let mut file_guard = None;
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
        let appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        let file_filter = EnvFilter::new(config.file_level.to_string());
        layers.push(Box::new(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_filter(file_filter),
        ));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if config.file_logging {
        tracing::info!("File logging enabled: {}", config.log_dir.display());
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
