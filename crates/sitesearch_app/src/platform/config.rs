use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};
use sitesearch_client::{ClientSettings, DEFAULT_BASE_URL};
use sitesearch_logging::LevelFilter;
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "sitesearch.ron";

#[derive(Parser, Debug, Default)]
#[command(
    name = "sitesearch",
    version,
    about = "Search a website's content through a sitesearch service"
)]
pub struct Args {
    /// RON config file (defaults to ./sitesearch.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the search service
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Prefill the website URL field
    #[arg(long)]
    pub url: Option<String>,

    /// Prefill the search query field
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            max_response_bytes: 8 * 1024 * 1024,
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./sitesearch.log"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl AppConfig {
    /// Resolves the config file, then applies command-line overrides.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_args(args);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.request_timeout_ms = timeout_ms;
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        sitesearch_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }
}
