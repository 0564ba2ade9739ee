use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, StoreClient, StoreError};
use shared_models::auth::RoleLookup;
use shared_utils::extractor::lookup_role;

/// Directory service over the `users` collection. Profiles are upserted
/// keyed by email; the role field is a separate privileged mutation and is
/// never written through the profile path.
pub struct UserService {
    store: Arc<StoreClient>,
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    /// Idempotent profile upsert. Profile fields pass through verbatim; the
    /// email path parameter wins over any email in the body.
    pub async fn upsert_profile(&self, email: &str, profile: Value) -> Result<Value, StoreError> {
        debug!("Upserting user profile: {}", email);

        let mut record = match profile {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("email".to_string(), json!(email));
        record.remove("role");

        self.store
            .upsert::<Value, _>("users", "email", &Value::Object(record))
            .await
    }

    pub async fn list(&self) -> Result<Vec<Value>, StoreError> {
        self.store.find("users", &[]).await
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool, StoreError> {
        Ok(lookup_role(&self.store, email).await? == RoleLookup::Admin)
    }

    /// Privileged role elevation. Absent users are a not-found outcome, not
    /// an implicit insert.
    pub async fn elevate_to_admin(&self, email: &str) -> Result<Value, StoreError> {
        debug!("Elevating user to admin: {}", email);

        let mut updated = self
            .store
            .update::<Value, _>("users", &[("email", email)], &json!({ "role": "admin" }))
            .await?;

        updated
            .pop()
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", email)))
    }
}
