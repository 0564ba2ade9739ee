use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::{admin_middleware, auth_middleware};

use crate::handlers;

pub fn user_routes(state: Arc<AppState>) -> Router {
    // The upsert is public (it is how clients obtain a token); elevation is
    // admin-gated. "/admin/{email}" wins over the "{email}" param route.
    Router::new()
        .route("/{email}", put(handlers::upsert_user))
        .route(
            "/",
            get(handlers::list_users).layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .route(
            "/admin/{email}",
            put(handlers::elevate_admin)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin_middleware,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .with_state(state)
}

/// Public admin probe mounted at /admin.
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/{email}", get(handlers::admin_status))
        .with_state(state)
}
