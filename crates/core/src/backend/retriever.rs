//! Downloads exported files into a local directory.

use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::error::BackendError;
use super::traits::FileRetriever;

/// Fetches files over HTTP and writes them under `download_dir`.
///
/// Each retrieval runs on its own task; failures are logged and otherwise
/// dropped, matching a browser download the page never hears back from.
#[derive(Clone)]
pub struct HttpFileRetriever {
    client: Client,
    base_url: String,
    download_dir: PathBuf,
}

impl HttpFileRetriever {
    pub fn new(base_url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Absolute URL for `path`; relative paths hang off the backend base URL.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn download(
        client: Client,
        url: String,
        destination: PathBuf,
    ) -> Result<u64, BackendError> {
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status {
                status: response.status().as_u16(),
                message: format!("download of {} failed", url),
            });
        }
        let bytes = response.bytes().await?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BackendError::Request(format!("create {:?}: {}", parent, e)))?;
        }
        tokio::fs::write(&destination, &bytes)
            .await
            .map_err(|e| BackendError::Request(format!("write {:?}: {}", destination, e)))?;

        Ok(bytes.len() as u64)
    }
}

/// Keeps a suggested filename inside the download directory.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl FileRetriever for HttpFileRetriever {
    async fn retrieve(&self, path: &str, suggested_filename: &str) {
        let url = self.resolve_url(path);
        let destination = self.download_dir.join(sanitize_filename(suggested_filename));
        let client = self.client.clone();

        tokio::spawn(async move {
            match Self::download(client, url.clone(), destination.clone()).await {
                Ok(bytes) => info!(url = %url, path = ?destination, bytes, "Downloaded export file"),
                Err(e) => warn!(
                    url = %url,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Export download failed"
                ),
            }
        });
    }
}
