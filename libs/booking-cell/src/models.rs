use serde::{Deserialize, Serialize};

/// A booking ties a patient to one slot of a treatment on a calendar day.
/// `date` is an opaque string key compared by equality only; no date
/// arithmetic happens anywhere. At most one booking may exist per
/// (treatment, date, patient) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub treatment: String,
    pub date: String,
    pub patient: String,
    #[serde(rename = "patientName", skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// A duplicate booking is a normal negative outcome, not a fault.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(Booking),
    AlreadyBooked(Booking),
}

/// Body of the paid-confirmation PATCH.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfirmation {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    pub amount: Option<f64>,
}
