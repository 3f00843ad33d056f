use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::moderation::PaymentStatus;

/// Database model for a watchlist entry / order record. Item, market and
/// price are snapshotted at add time so the order keeps the terms the buyer
/// saw even if the vendor later edits the listing.
#[derive(Debug, Clone, FromRow)]
pub struct WatchlistEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_email: String,
    pub item_name: String,
    pub market_name: String,
    pub price_per_unit: Decimal,
    pub date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub delivery_status: String,
    pub created_at: DateTime<Utc>,
}
