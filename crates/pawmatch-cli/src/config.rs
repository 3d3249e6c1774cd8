//! Configuration management for the PawMatch CLI
//!
//! Values are layered: optional YAML file, then `PAWMATCH__*` environment
//! variables, then command line flags.

use std::path::PathBuf;

use clap::Parser;
use config::{Config, Environment};
use pawmatch_client::HttpClientConfig;
use pawmatch_client::constants::DEFAULT_BASE_URL;

use crate::logging::LoggingConfig;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "conf/pawmatch.yml";

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "pawmatch", version, about = "Find an adoptable dog from the terminal")]
pub struct Cli {
    /// Extra YAML config file
    #[arg(short = 'c', long = "config", env = "PAWMATCH_CONFIG")]
    pub config_file: Option<PathBuf>,
    /// Service base URL
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
    /// Log in right away with this name (requires --email)
    #[arg(long, requires = "email")]
    pub name: Option<String>,
    /// Log in right away with this email (requires --name)
    #[arg(long, requires = "name")]
    pub email: Option<String>,
    /// Console log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = &cli.config_file {
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        builder = builder.add_source(
            Environment::with_prefix("PAWMATCH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(v) = &cli.base_url {
            builder = builder.set_override("client.base_url", v.as_str())?;
        }
        if let Some(v) = &cli.log_level {
            builder = builder.set_override("logging.level", v.as_str())?;
        }

        Ok(Self {
            config: builder.build()?,
        })
    }

    pub fn base_url(&self) -> String {
        self.config
            .get_string("client.base_url")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn connect_timeout_ms(&self) -> u64 {
        self.config
            .get_int("client.connect_timeout_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(5000)
    }

    pub fn read_timeout_ms(&self) -> u64 {
        self.config
            .get_int("client.read_timeout_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(30000)
    }

    pub fn user_agent(&self) -> Option<String> {
        self.config.get_string("client.user_agent").ok()
    }

    pub fn log_level(&self) -> String {
        self.config
            .get_string("logging.level")
            .unwrap_or_else(|_| "warn".to_string())
    }

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string("logging.dir").ok()
    }

    pub fn file_logging(&self) -> bool {
        self.config.get_bool("logging.file").unwrap_or(false)
    }

    pub fn http_client_config(&self) -> HttpClientConfig {
        let config = HttpClientConfig::new(&self.base_url())
            .with_timeouts(self.connect_timeout_ms(), self.read_timeout_ms());
        match self.user_agent() {
            Some(user_agent) => config.with_user_agent(&user_agent),
            None => config,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(self.log_dir(), self.file_logging(), self.log_level())
    }
}
