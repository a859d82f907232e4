//! # Configuration
//!
//! Settings resolve with a fixed override order:
//! defaults → `~/.museos/config.yaml` → env vars → CLI flags.
//!
//! The base URLs are fixed for the lifetime of the process.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_CURATORS_URL, DEFAULT_LOG_FILE, DEFAULT_MUSEUMS_URL,
    DEFAULT_TIMEOUT_SECS, ENV_CURATORS_URL, ENV_MUSEUMS_URL,
};
use crate::routes::Route;

/// Command line flags
#[derive(Debug, Default, Parser)]
#[command(name = "museos-tui", version, about = "Terminal admin console for museums and curators")]
pub struct CliArgs {
    /// Base URL of the museums service
    #[arg(long)]
    pub museums_url: Option<String>,

    /// Base URL of the curators service
    #[arg(long)]
    pub curators_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Alternative config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Initial route ("/" or "/curadores")
    #[arg(long, value_parser = parse_route)]
    pub route: Option<Route>,
}

fn parse_route(path: &str) -> Result<Route, String> {
    Route::from_path(path).ok_or_else(|| format!("unknown route '{path}', expected '/' or '/curadores'"))
}

/// Sparse on-disk config; every field optional
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FileConfig {
    pub museums_url: Option<String>,
    pub curators_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub museums_url: String,
    pub curators_url: String,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub initial_route: Route,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Returns the path to `~/.museos/config.yaml`
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl Config {
    /// Load from disk and the process environment, then apply `cli`
    pub fn load(cli: &CliArgs) -> Result<Config, ConfigError> {
        let file = match cli.config.clone().or_else(config_path) {
            Some(path) => load_file(&path)?,
            None => FileConfig::default(),
        };
        Ok(Config::resolve(file, |key| std::env::var(key).ok(), cli))
    }

    /// Merge the layers; later layers win
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>, cli: &CliArgs) -> Config {
        let museums_url = cli
            .museums_url
            .clone()
            .or_else(|| env(ENV_MUSEUMS_URL))
            .or(file.museums_url)
            .unwrap_or_else(|| DEFAULT_MUSEUMS_URL.to_string());
        let curators_url = cli
            .curators_url
            .clone()
            .or_else(|| env(ENV_CURATORS_URL))
            .or(file.curators_url)
            .unwrap_or_else(|| DEFAULT_CURATORS_URL.to_string());
        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_file = cli
            .log_file
            .clone()
            .or(file.log_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Config {
            museums_url: normalize_url(museums_url),
            curators_url: normalize_url(curators_url),
            timeout: Duration::from_secs(timeout_secs),
            log_file,
            initial_route: cli.route.unwrap_or_default(),
        }
    }
}
