use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::error::AppError;
use shared_utils::jwt::create_token;

use crate::services::profile::UserService;

/// Upsert a user profile and issue a fresh access token. This is the only
/// token-issuance path; there is no refresh endpoint.
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(profile): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let users = UserService::new(&state);

    let result = users.upsert_profile(&email, profile).await?;

    let token = create_token(&email, &state.config.access_token_secret)
        .map_err(AppError::Internal)?;

    debug!("Issued token for {}", email);

    Ok(Json(json!({
        "result": result,
        "token": token
    })))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let users = UserService::new(&state);

    let records = users.list().await?;

    Ok(Json(json!(records)))
}

pub async fn elevate_admin(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let users = UserService::new(&state);

    let updated = users.elevate_to_admin(&email).await?;

    Ok(Json(json!(updated)))
}

/// Public probe used by the portal UI to decide whether to show admin
/// navigation. Unknown users are simply not admins.
pub async fn admin_status(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let users = UserService::new(&state);

    let admin = users.is_admin(&email).await?;

    Ok(Json(json!({ "admin": admin })))
}
