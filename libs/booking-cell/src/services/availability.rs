use std::collections::HashSet;
use std::sync::Arc;

use shared_database::{AppState, StoreClient, StoreError};
use treatment_cell::models::TreatmentService;

use crate::models::Booking;

/// Replace each service's slot catalog with the subsequence not yet taken by
/// a booking for that service on the target date. Catalog order is
/// preserved. Bookings whose treatment matches no service are ignored.
///
/// Pure set difference per service; the caller supplies the bookings already
/// filtered to one date.
pub fn annotate_available_slots(
    mut services: Vec<TreatmentService>,
    bookings: &[Booking],
) -> Vec<TreatmentService> {
    for service in &mut services {
        let booked: HashSet<&str> = bookings
            .iter()
            .filter(|booking| booking.treatment == service.name)
            .map(|booking| booking.slot.as_str())
            .collect();

        if booked.is_empty() {
            continue;
        }

        service.slots.retain(|slot| !booked.contains(slot.as_str()));
    }

    services
}

/// Fetches the inputs and delegates to the pure computation.
pub struct AvailabilityService {
    store: Arc<StoreClient>,
}

impl AvailabilityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: Arc::clone(&state.store),
        }
    }

    pub async fn available_for_date(
        &self,
        date: &str,
    ) -> Result<Vec<TreatmentService>, StoreError> {
        let services: Vec<TreatmentService> = self.store.find("services", &[]).await?;
        let bookings: Vec<Booking> = self.store.find("bookings", &[("date", date)]).await?;

        Ok(annotate_available_slots(services, &bookings))
    }
}
