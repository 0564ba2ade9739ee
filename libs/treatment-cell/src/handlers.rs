use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::CreateServiceRequest;
use crate::services::catalog::CatalogService;

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(&state);

    let services = catalog.list().await?;

    Ok(Json(json!(services)))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(&state);

    let service = catalog.create(request).await?;

    Ok(Json(json!(service)))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(&state);

    catalog.remove(&name).await?;

    Ok(Json(json!({ "deleted": true })))
}
