use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use orderdesk_core::{
    BackendError, Config, DownloadResolver, FileRetriever, OrderDashboard, OrderSource,
    SanitizedConfig, StateChangeSubmitter,
};

use crate::metrics::RELOAD_FAILURES_TOTAL;

/// External collaborators the dashboard talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub orders: Arc<dyn OrderSource>,
    pub submitter: Arc<dyn StateChangeSubmitter>,
    pub resolver: Arc<dyn DownloadResolver>,
    pub retriever: Arc<dyn FileRetriever>,
}

/// Shared application state
pub struct AppState {
    config: Config,
    dashboard: RwLock<OrderDashboard>,
    collaborators: Collaborators,
}

impl AppState {
    pub fn new(config: Config, dashboard: OrderDashboard, collaborators: Collaborators) -> Self {
        Self {
            config,
            dashboard: RwLock::new(dashboard),
            collaborators,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn dashboard(&self) -> &RwLock<OrderDashboard> {
        &self.dashboard
    }

    pub fn submitter(&self) -> Arc<dyn StateChangeSubmitter> {
        Arc::clone(&self.collaborators.submitter)
    }

    pub fn resolver(&self) -> Arc<dyn DownloadResolver> {
        Arc::clone(&self.collaborators.resolver)
    }

    pub fn retriever(&self) -> Arc<dyn FileRetriever> {
        Arc::clone(&self.collaborators.retriever)
    }

    /// Fetches every order and replaces the dashboard rows.
    ///
    /// The fetch runs without holding the dashboard lock. On failure the
    /// current rows are left untouched.
    pub async fn reload(&self) -> Result<usize, BackendError> {
        let rows = match self.collaborators.orders.fetch_orders().await {
            Ok(rows) => rows,
            Err(e) => {
                RELOAD_FAILURES_TOTAL.inc();
                warn!(error = %e, retryable = e.is_retryable(), "Failed to reload orders");
                return Err(e);
            }
        };

        let count = rows.len();
        self.dashboard.write().await.load(rows);
        info!(count, "Orders reloaded");
        Ok(count)
    }
}
