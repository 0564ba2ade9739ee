use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::{admin_middleware, auth_middleware};

use crate::handlers;

pub fn treatment_routes(state: Arc<AppState>) -> Router {
    // Listing is public; mutating the catalog is an admin directory
    // operation. Layer order matters: auth must run before the role check.
    Router::new()
        .route("/", get(handlers::list_services))
        .route(
            "/",
            post(handlers::create_service)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin_middleware,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .route(
            "/{name}",
            delete(handlers::delete_service)
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
