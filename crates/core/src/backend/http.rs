//! HTTP adapter for the order backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::table::Row;

use super::error::BackendError;
use super::traits::{DownloadResolver, OrderSource, StateChangeSubmitter};
use super::types::{DownloadTargetResponse, ExportVariant, RedesignRequestBody, SubmitResponse};

/// Talks to the order backend's REST API.
///
/// - `GET  {url}/orders`
/// - `POST {url}/orders/{id}/redesign`
/// - `GET  {url}/orders/{id}/files/{variant}`
pub struct HttpOrderBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpOrderBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn order_url(&self, id: &str, rest: &str) -> String {
        format!("{}/orders/{}/{}", self.base_url(), urlencoding::encode(id), rest)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) if !key.is_empty() => request.bearer_auth(key),
            _ => request,
        }
    }
}

/// Turns a non-success response into a `BackendError::Status`.
async fn error_for_status(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Status {
        status,
        message: body.chars().take(200).collect(),
    }
}

#[async_trait]
impl OrderSource for HttpOrderBackend {
    async fn fetch_orders(&self) -> Result<Vec<Row>, BackendError> {
        let url = format!("{}/orders", self.base_url());
        debug!(url = %url, "Fetching orders");

        let response = self.authorize(self.client.get(&url)).send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(format!("invalid order list: {}", e)))?;
        debug!(count = rows.len(), "Fetched orders");
        Ok(rows)
    }
}

#[async_trait]
impl StateChangeSubmitter for HttpOrderBackend {
    async fn submit_state_change(
        &self,
        id: &str,
        message: &str,
    ) -> Result<SubmitResponse, BackendError> {
        let url = self.order_url(id, "redesign");
        let body = RedesignRequestBody {
            message: message.to_string(),
        };

        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(error_for_status(response).await);
        }

        // Client errors still carry a `{status, message}` body worth reporting.
        match response.json::<SubmitResponse>().await {
            Ok(resp) => Ok(resp),
            Err(e) if status.is_success() => Err(BackendError::Parse(e.to_string())),
            Err(_) => Ok(SubmitResponse::rejected(
                "error",
                format!("Request rejected with HTTP {}", status.as_u16()),
            )),
        }
    }
}

#[async_trait]
impl DownloadResolver for HttpOrderBackend {
    async fn resolve_download_target(
        &self,
        row: &Row,
        variant: ExportVariant,
    ) -> Result<Option<String>, BackendError> {
        let url = self.order_url(row.id(), &format!("files/{}", variant.as_str()));
        let response = self.authorize(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let err = error_for_status(response).await;
            warn!(order_id = %row.id(), variant = %variant, error = %err, "Download lookup failed");
            return Err(err);
        }

        let target: DownloadTargetResponse = response.json().await?;
        Ok(target.path.filter(|p| !p.trim().is_empty()))
    }
}
