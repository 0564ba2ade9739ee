use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppState>) -> Router {
    // Creating a booking is public; reading and paying require a bearer
    // token.
    Router::new()
        .route("/", post(handlers::create_booking))
        .route(
            "/",
            get(handlers::list_patient_bookings).layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .route(
            "/{booking_id}",
            get(handlers::get_booking)
                .patch(handlers::confirm_payment)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        .with_state(state)
}

pub fn availability_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::available_slots))
        .with_state(state)
}
