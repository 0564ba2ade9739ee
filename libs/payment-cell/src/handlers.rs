use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::CreatePaymentIntentRequest;
use crate::services::stripe::StripeClient;

pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<Value>, AppError> {
    let stripe =
        StripeClient::new(&state.config).map_err(|e| AppError::ExternalService(e.to_string()))?;

    let amount = (request.price * 100.0).round() as i64;

    let intent = stripe
        .create_payment_intent(amount)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({ "clientSecret": intent.client_secret })))
}
