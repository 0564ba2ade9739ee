use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use shared_database::{AppState, StoreClient, StoreError};

use crate::models::{CreateDoctorRequest, Doctor};

/// Directory service over the `doctors` collection.
pub struct RosterService {
    store: Arc<StoreClient>,
}

impl RosterService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>, StoreError> {
        self.store.find("doctors", &[]).await
    }

    pub async fn create(&self, request: CreateDoctorRequest) -> Result<Doctor, StoreError> {
        debug!("Adding doctor to roster: {}", request.email);

        let existing: Option<Doctor> = self
            .store
            .find_one("doctors", &[("email", &request.email)])
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "Doctor with email {} already exists",
                request.email
            )));
        }

        let record = json!({
            "name": request.name,
            "email": request.email,
            "specialty": request.specialty,
            "imageUrl": request.image_url
        });

        self.store.insert("doctors", &record).await
    }

    pub async fn remove(&self, email: &str) -> Result<(), StoreError> {
        debug!("Removing doctor from roster: {}", email);
        self.store.delete("doctors", &[("email", email)]).await
    }
}
