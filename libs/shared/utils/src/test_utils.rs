use std::sync::Arc;

use chrono::Duration;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::AppState;

use crate::jwt::create_token_with_expiry;

pub struct TestConfig {
    pub jwt_secret: String,
    pub store_url: String,
    pub store_api_key: String,
    pub stripe_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            store_url: "http://localhost:54321".to_string(),
            store_api_key: "test-api-key".to_string(),
            stripe_base_url: "http://localhost:12111".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            store_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            access_token_secret: self.jwt_secret.clone(),
            stripe_secret_key: "sk_test_key".to_string(),
            stripe_base_url: self.stripe_base_url.clone(),
            port: 0,
        }
    }

    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config()))
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        create_token_with_expiry(email, secret, Duration::hours(exp_hours.unwrap_or(24)))
            .expect("failed to create test token")
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        create_token_with_expiry(email, secret, Duration::hours(-1))
            .expect("failed to create expired test token")
    }

    pub fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }
}

/// Canned store payloads for wiremock-backed tests.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn user(email: &str, role: Option<&str>) -> Value {
        json!({
            "id": format!("user-{}", email),
            "email": email,
            "role": role,
            "name": "Test User"
        })
    }

    pub fn service(id: &str, name: &str, price: f64, slots: &[&str]) -> Value {
        json!({
            "id": id,
            "name": name,
            "price": price,
            "slots": slots
        })
    }

    pub fn booking(id: &str, treatment: &str, date: &str, patient: &str, slot: &str) -> Value {
        json!({
            "id": id,
            "treatment": treatment,
            "date": date,
            "patient": patient,
            "patientName": "Test Patient",
            "slot": slot,
            "paid": false
        })
    }

    pub fn doctor(email: &str, name: &str, specialty: &str) -> Value {
        json!({
            "id": format!("doctor-{}", email),
            "email": email,
            "name": name,
            "specialty": specialty
        })
    }
}
