//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::StoreError;
use inkpost_core::ports::PostStore;
use inkpost_infra::JsonFilePostStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    /// Open the file-backed post store named by the configuration.
    pub async fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let store = JsonFilePostStore::open(config.data_file.clone()).await?;
        tracing::info!("Application state initialized");
        Ok(Self::new(Arc::new(store)))
    }
}
