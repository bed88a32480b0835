use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::table::DEFAULT_ROWS_PER_PAGE;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Order backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the order API (e.g., "http://localhost:9000/api")
    pub url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Listing table configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TableConfig {
    /// Page size used on load and after a reset
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    /// Page sizes offered in the page-size picker
    #[serde(default = "default_rows_per_page_options")]
    pub rows_per_page_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: default_rows_per_page(),
            rows_per_page_options: default_rows_per_page_options(),
        }
    }
}

fn default_rows_per_page() -> usize {
    DEFAULT_ROWS_PER_PAGE
}

fn default_rows_per_page_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

/// Export download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory exported files are written to
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub backend: SanitizedBackendConfig,
    pub table: TableConfig,
    pub export: ExportConfig,
}

/// Sanitized backend config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedBackendConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            backend: SanitizedBackendConfig {
                url: config.backend.url.clone(),
                api_key_configured: config
                    .backend
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.is_empty()),
                timeout_secs: config.backend.timeout_secs,
            },
            table: config.table.clone(),
            export: config.export.clone(),
        }
    }
}
