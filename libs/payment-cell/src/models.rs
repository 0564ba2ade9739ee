use serde::Deserialize;
use thiserror::Error;

/// Body of POST /create-payment-intent. The price is in major units; the
/// provider is charged in minor units (price x 100).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

/// The slice of the provider's payment-intent object we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment provider is not configured")]
    NotConfigured,

    #[error("Payment provider error: {message}")]
    ProviderError { message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
