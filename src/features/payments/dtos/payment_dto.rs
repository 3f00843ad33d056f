use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::payments::models::{Payment, PaymentRecordStatus};

/// Request DTO for starting a payment. The amount is derived server-side
/// from the order; a client cannot name its own price.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentIntentDto {
    pub watchlist_id: Uuid,
}

/// What the browser needs to collect the card: the gateway client secret.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponseDto {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_cents: i64,
    pub currency: String,
}

/// Request DTO for confirming a successful charge
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConfirmPaymentDto {
    #[validate(length(min = 1))]
    pub payment_intent_id: String,

    /// Gateway transaction id; defaults to the intent id when omitted
    pub transaction_id: Option<String>,
}

/// Response DTO for a payment record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponseDto {
    pub id: Uuid,
    pub watchlist_id: Uuid,
    pub user_email: String,
    pub amount: Decimal,
    pub amount_cents: i64,
    pub currency: String,
    pub payment_intent_id: String,
    pub transaction_id: Option<String>,
    pub status: PaymentRecordStatus,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<Payment> for PaymentResponseDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            watchlist_id: p.watchlist_id,
            user_email: p.user_email,
            amount: p.amount,
            amount_cents: p.amount_cents,
            currency: p.currency,
            payment_intent_id: p.payment_intent_id,
            transaction_id: p.transaction_id,
            status: p.status,
            created_at: p.created_at,
            confirmed_at: p.confirmed_at,
        }
    }
}
