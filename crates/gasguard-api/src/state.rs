//! Application state shared across API handlers

use std::sync::Arc;

use gasguard_core::{AppConfig, ProviderError};
use okx_client::OkxClient;
use swap_optimizer::RouteScorer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    scorer: RouteScorer,
}

impl AppState {
    /// Create with an explicit scorer
    pub fn new(config: AppConfig, scorer: RouteScorer) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, scorer }),
        }
    }

    /// Build the OKX client and scorer from config
    pub fn from_config(config: AppConfig) -> Result<Self, ProviderError> {
        let client = OkxClient::new(config.okx.clone())?;
        tracing::info!("OKX client created for {}", config.okx.api_domain);
        let scorer = RouteScorer::with_client(client, config.scoring.clone());
        Ok(Self::new(config, scorer))
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn scorer(&self) -> &RouteScorer {
        &self.inner.scorer
    }
}
