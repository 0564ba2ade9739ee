use std::sync::Arc;

use shared_config::AppConfig;

use crate::store::StoreClient;

/// Shared application state. The store client is opened once at process
/// start and reused by every request.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<StoreClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(StoreClient::new(&config));
        Self { config, store }
    }
}
