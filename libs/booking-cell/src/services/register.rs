use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use shared_database::{AppState, StoreClient, StoreError};

use crate::models::{Booking, BookingOutcome, PaymentConfirmation};

/// Booking register over the `bookings` and `payments` collections.
///
/// Uniqueness of the (treatment, date, patient) triple is guaranteed by the
/// store's unique index; the pre-insert lookup only serves the common case
/// without a failed write. Two patients may still hold the same slot for the
/// same treatment and date; only the triple is constrained.
pub struct BookingRegister {
    store: Arc<StoreClient>,
}

impl BookingRegister {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    pub async fn create(&self, booking: Booking) -> Result<BookingOutcome, StoreError> {
        debug!(
            "Creating booking: {} on {} for {}",
            booking.treatment, booking.date, booking.patient
        );

        let filters = [
            ("treatment", booking.treatment.as_str()),
            ("date", booking.date.as_str()),
            ("patient", booking.patient.as_str()),
        ];

        if let Some(existing) = self.store.find_one::<Booking>("bookings", &filters).await? {
            return Ok(BookingOutcome::AlreadyBooked(existing));
        }

        match self.store.insert::<Booking, _>("bookings", &booking).await {
            Ok(stored) => Ok(BookingOutcome::Created(stored)),
            Err(StoreError::Conflict(_)) => {
                // A concurrent request won the unique-index race; surface its
                // record as the normal duplicate outcome.
                let winner = self.store.find_one::<Booking>("bookings", &filters).await?;
                match winner {
                    Some(existing) => Ok(BookingOutcome::AlreadyBooked(existing)),
                    None => Err(StoreError::Conflict(
                        "duplicate booking detected but winner not readable".to_string(),
                    )),
                }
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, booking_id: &str) -> Result<Option<Booking>, StoreError> {
        self.store.find_one("bookings", &[("id", booking_id)]).await
    }

    pub async fn list_for_patient(&self, patient: &str) -> Result<Vec<Booking>, StoreError> {
        self.store.find("bookings", &[("patient", patient)]).await
    }

    /// Mark a booking paid and append a payment record. The two writes are
    /// independent: a fault in one does not roll back the other.
    pub async fn record_payment(
        &self,
        booking_id: &str,
        confirmation: PaymentConfirmation,
    ) -> Result<Booking, StoreError> {
        debug!(
            "Recording payment {} against booking {}",
            confirmation.transaction_id, booking_id
        );

        let patch = json!({
            "paid": true,
            "transactionId": &confirmation.transaction_id
        });
        let updated = self
            .store
            .update::<Booking, _>("bookings", &[("id", booking_id)], &patch)
            .await;

        let payment = json!({
            "bookingId": booking_id,
            "transactionId": &confirmation.transaction_id,
            "amount": confirmation.amount
        });
        if let Err(e) = self.store.insert::<Value, _>("payments", &payment).await {
            warn!("Payment record insert failed for booking {}: {}", booking_id, e);
        }

        let mut updated = updated?;
        updated
            .pop()
            .ok_or_else(|| StoreError::NotFound(format!("Booking {} not found", booking_id)))
    }
}
