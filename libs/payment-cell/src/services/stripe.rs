use reqwest::Client;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{PaymentError, PaymentIntent};

/// Stripe payment-intents client.
/// Based on: https://docs.stripe.com/api/payment_intents/create
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(config: &AppConfig) -> Result<Self, PaymentError> {
        if !config.is_payments_configured() {
            return Err(PaymentError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            secret_key: config.stripe_secret_key.clone(),
            base_url: config.stripe_base_url.clone(),
        })
    }

    /// Create a card payment intent for `amount` minor units of USD.
    /// POST /v1/payment_intents
    pub async fn create_payment_intent(
        &self,
        amount: i64,
    ) -> Result<PaymentIntent, PaymentError> {
        info!("Creating payment intent for {} minor units", amount);

        let url = format!("{}/v1/payment_intents", self.base_url);

        // Stripe takes form-encoded bodies, not JSON.
        let params = [
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        debug!("Payment intent response: {} - {}", status, response_text);

        if !status.is_success() {
            error!("Payment intent creation failed: {} - {}", status, response_text);
            return Err(PaymentError::ProviderError {
                message: format!("HTTP {}: {}", status, response_text),
            });
        }

        let intent: PaymentIntent = serde_json::from_str(&response_text).map_err(|e| {
            PaymentError::ProviderError {
                message: format!("Invalid payment intent response: {}", e),
            }
        })?;

        Ok(intent)
    }
}
