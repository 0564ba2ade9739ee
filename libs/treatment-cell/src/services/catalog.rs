use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use shared_database::{AppState, StoreClient, StoreError};

use crate::models::{CreateServiceRequest, TreatmentService};

/// Directory service over the `services` collection. Pure store
/// pass-through, no domain logic.
pub struct CatalogService {
    store: Arc<StoreClient>,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    pub async fn list(&self) -> Result<Vec<TreatmentService>, StoreError> {
        self.store.find("services", &[]).await
    }

    pub async fn create(
        &self,
        request: CreateServiceRequest,
    ) -> Result<TreatmentService, StoreError> {
        debug!("Creating treatment service: {}", request.name);

        let existing: Option<TreatmentService> = self
            .store
            .find_one("services", &[("name", &request.name)])
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "Service {} already exists",
                request.name
            )));
        }

        let record = json!({
            "name": request.name,
            "price": request.price,
            "slots": request.slots
        });

        self.store.insert("services", &record).await
    }

    pub async fn remove(&self, name: &str) -> Result<(), StoreError> {
        debug!("Deleting treatment service: {}", name);
        self.store.delete("services", &[("name", name)]).await
    }
}
