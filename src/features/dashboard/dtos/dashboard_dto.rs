use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::UserRole;

/// Global counters for admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSummaryDto {
    pub total_users: i64,
    pub total_products: i64,
    pub pending_products: i64,
    pub approved_products: i64,
    pub rejected_products: i64,
    pub total_ads: i64,
    pub pending_ads: i64,
    pub total_orders: i64,
    pub paid_orders: i64,
}

/// A vendor's own listing counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VendorSummaryDto {
    pub total_products: i64,
    pub pending_products: i64,
    pub approved_products: i64,
    pub rejected_products: i64,
    pub total_ads: i64,
}

/// A buyer's own activity counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyerSummaryDto {
    pub watchlist_count: i64,
    pub paid_orders: i64,
    pub reviews_posted: i64,
}

/// The summary returned by `/api/dashboard/summary`: exactly one section is
/// populated, matching the caller's role.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminSummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorSummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<BuyerSummaryDto>,
}
