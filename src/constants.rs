//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the museums service
pub const DEFAULT_MUSEUMS_URL: &str = "http://localhost:8005/api/museos";

/// Default base URL of the curators service
pub const DEFAULT_CURATORS_URL: &str = "http://localhost:8004/api/curadores";

/// Transport timeout applied to every HTTP call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long a status-bar notice stays visible
pub const NOTICE_TTL_SECS: i64 = 6;

/// Log file written next to the working directory
pub const DEFAULT_LOG_FILE: &str = "museos.log";

/// Environment overrides for the base URLs
pub const ENV_MUSEUMS_URL: &str = "MUSEOS_API_URL";
pub const ENV_CURATORS_URL: &str = "CURADORES_API_URL";

/// Directory under `$HOME` holding `config.yaml`
pub const CONFIG_DIR: &str = ".museos";
pub const CONFIG_FILE: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "Museos TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
