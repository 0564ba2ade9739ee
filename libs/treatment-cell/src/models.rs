use serde::{Deserialize, Serialize};

/// A bookable treatment. `name` is the unique join key bookings reference;
/// `slots` is the full catalog of bookable time labels. Availability is
/// derived per date, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub price: f64,
    pub slots: Vec<String>,
}
