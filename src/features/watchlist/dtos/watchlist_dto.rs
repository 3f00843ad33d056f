use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::watchlist::models::WatchlistEntry;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::moderation::PaymentStatus;
use crate::shared::types::PaginationQuery;

/// Request DTO for tracking a product. Only the product id: the buyer
/// identity and the item/market/price snapshot are filled in server-side.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddWatchlistDto {
    pub product_id: Uuid,
}

/// Query param for the check and cancel endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct WatchlistItemQuery {
    pub product_id: Uuid,
}

/// Whether the caller already tracks a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WatchlistCheckDto {
    pub in_watchlist: bool,
}

/// Query params for the admin orders view
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrdersQuery {
    /// Filter by buyer email
    pub email: Option<String>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl OrdersQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for a watchlist entry / order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WatchlistEntryDto {
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

impl From<WatchlistEntry> for WatchlistEntryDto {
    fn from(e: WatchlistEntry) -> Self {
        Self {
            id: e.id,
            product_id: e.product_id,
            user_email: e.user_email,
            item_name: e.item_name,
            market_name: e.market_name,
            price_per_unit: e.price_per_unit,
            date: e.date,
            payment_status: e.payment_status,
            delivery_status: e.delivery_status,
            created_at: e.created_at,
        }
    }
}
