use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::{admin_middleware, auth_middleware};

use crate::handlers;

/// The whole roster surface is admin-only.
pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/{email}", delete(handlers::delete_doctor))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
