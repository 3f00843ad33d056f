use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Payment record status enum matching the database `payment_record_status`
/// enum. `initiated` rows exist from before the external charge was
/// attempted; `succeeded` rows carry the gateway transaction id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_record_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    Initiated,
    Succeeded,
}

impl std::fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentRecordStatus::Initiated => write!(f, "initiated"),
            PaymentRecordStatus::Succeeded => write!(f, "succeeded"),
        }
    }
}

/// Database model for a payment record
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
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
