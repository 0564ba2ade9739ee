use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::AuthUser;
use shared_models::error::AppError;

use crate::models::{Booking, BookingOutcome, PaymentConfirmation};
use crate::services::availability::AvailabilityService;
use crate::services::register::BookingRegister;

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    pub patient: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub date: String,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Booking>,
) -> Result<Json<Value>, AppError> {
    let register = BookingRegister::new(&state);

    match register.create(booking).await? {
        BookingOutcome::Created(result) => Ok(Json(json!({
            "success": true,
            "result": result
        }))),
        BookingOutcome::AlreadyBooked(existing) => Ok(Json(json!({
            "success": false,
            "booking": existing
        }))),
    }
}

/// A patient may only enumerate their own bookings; the query identity must
/// match the authenticated identity.
pub async fn list_patient_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Value>, AppError> {
    if query.patient != user.email {
        return Err(AppError::Forbidden(
            "Cannot list another patient's bookings".to_string(),
        ));
    }

    let register = BookingRegister::new(&state);

    let bookings = register.list_for_patient(&query.patient).await?;

    Ok(Json(json!(bookings)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let register = BookingRegister::new(&state);

    let booking = register
        .get(&booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

    Ok(Json(json!(booking)))
}

pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(confirmation): Json<PaymentConfirmation>,
) -> Result<Json<Value>, AppError> {
    let register = BookingRegister::new(&state);

    let booking = register.record_payment(&booking_id, confirmation).await?;

    Ok(Json(json!(booking)))
}

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Value>, AppError> {
    let availability = AvailabilityService::new(&state);

    let services = availability.available_for_date(&query.date).await?;

    Ok(Json(json!(services)))
}
