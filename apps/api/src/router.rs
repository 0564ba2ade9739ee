use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::{availability_routes, booking_routes};
use doctor_cell::router::doctor_routes;
use payment_cell::router::payment_routes;
use shared_database::AppState;
use treatment_cell::router::treatment_routes;
use user_cell::router::{admin_routes, user_routes};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctors Portal API is running!" }))
        .nest("/service", treatment_routes(state.clone()))
        .nest("/booking", booking_routes(state.clone()))
        .nest("/available", availability_routes(state.clone()))
        .nest("/user", user_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        .nest("/doctor", doctor_routes(state.clone()))
        .nest("/create-payment-intent", payment_routes(state))
}
