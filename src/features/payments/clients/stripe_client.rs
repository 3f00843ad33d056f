use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::config::StripeConfig;
use crate::core::error::AppError;

/// A created charge intent at the gateway. The client secret goes back to
/// the browser so the card collection happens there, never through this
/// service.
#[derive(Debug, Clone)]
pub struct GatewayIntent {
    pub id: String,
    pub client_secret: String,
}

/// Seam for the external payment collaborator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        watchlist_id: Uuid,
    ) -> Result<GatewayIntent, AppError>;
}

/// Stripe implementation of [`PaymentGateway`], talking to the payment
/// intents API directly over HTTP.
pub struct StripeClient {
    config: StripeConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    client_secret: String,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        watchlist_id: Uuid,
    ) -> Result<GatewayIntent, AppError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("metadata[watchlist_id]", watchlist_id.to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Payment gateway request failed: {}", e);
                AppError::ExternalServiceError("Payment gateway unreachable".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Payment gateway returned {}: {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Payment gateway rejected the charge intent (HTTP {})",
                status
            )));
        }

        let intent: StripeIntentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse gateway response: {}", e);
            AppError::ExternalServiceError("Invalid payment gateway response".to_string())
        })?;

        Ok(GatewayIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}
