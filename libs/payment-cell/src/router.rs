use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn payment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_payment_intent))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
