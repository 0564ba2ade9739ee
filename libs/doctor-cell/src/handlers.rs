use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::CreateDoctorRequest;
use crate::services::roster::RosterService;

pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let roster = RosterService::new(&state);

    let doctors = roster.list().await?;

    Ok(Json(json!(doctors)))
}

pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let roster = RosterService::new(&state);

    let doctor = roster.create(request).await?;

    Ok(Json(json!(doctor)))
}

pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let roster = RosterService::new(&state);

    roster.remove(&email).await?;

    Ok(Json(json!({ "deleted": true })))
}
