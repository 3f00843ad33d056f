use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireBuyer};
use crate::features::watchlist::dtos::{
    AddWatchlistDto, OrdersQuery, WatchlistCheckDto, WatchlistEntryDto, WatchlistItemQuery,
};
use crate::features::watchlist::services::WatchlistService;
use crate::shared::types::{ApiResponse, Meta};

/// Track a product
///
/// Buyer-only: vendors and admins cannot hold a watchlist. The entry
/// snapshots the listing's item, market and price.
#[utoipa::path(
    post,
    path = "/api/watchlist",
    request_body = AddWatchlistDto,
    responses(
        (status = 200, description = "Product tracked", body = ApiResponse<WatchlistEntryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - buyer account required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Already tracked, or product not approved")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn add_to_watchlist(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<WatchlistService>>,
    AppJson(dto): AppJson<AddWatchlistDto>,
) -> Result<Json<ApiResponse<WatchlistEntryDto>>> {
    let entry = service.add(&user.email, dto.product_id).await?;
    Ok(Json(ApiResponse::success(
        Some(entry),
        Some("Added to your watchlist".to_string()),
        None,
    )))
}

/// The caller's watchlist / orders
#[utoipa::path(
    get,
    path = "/api/watchlist",
    responses(
        (status = 200, description = "Own watchlist entries", body = ApiResponse<Vec<WatchlistEntryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - buyer account required")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn list_my_watchlist(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<WatchlistService>>,
) -> Result<Json<ApiResponse<Vec<WatchlistEntryDto>>>> {
    let entries = service.list_mine(&user.email).await?;
    Ok(Json(ApiResponse::success(Some(entries), None, None)))
}

/// Whether the caller already tracks a product
#[utoipa::path(
    get,
    path = "/api/watchlist/check",
    params(WatchlistItemQuery),
    responses(
        (status = 200, description = "Check result", body = ApiResponse<WatchlistCheckDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn check_watchlist(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<WatchlistService>>,
    Query(query): Query<WatchlistItemQuery>,
) -> Result<Json<ApiResponse<WatchlistCheckDto>>> {
    let in_watchlist = service.contains(&user.email, query.product_id).await?;
    Ok(Json(ApiResponse::success(
        Some(WatchlistCheckDto { in_watchlist }),
        None,
        None,
    )))
}

/// A single entry (payment page)
#[utoipa::path(
    get,
    path = "/api/watchlist/{id}",
    params(("id" = Uuid, Path, description = "Watchlist entry id")),
    responses(
        (status = 200, description = "Watchlist entry", body = ApiResponse<WatchlistEntryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Entry not found")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn get_watchlist_entry(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<WatchlistService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WatchlistEntryDto>>> {
    let entry = service.get_owned(id, &user.email).await?;
    Ok(Json(ApiResponse::success(Some(entry), None, None)))
}

/// Cancel an unpaid entry
#[utoipa::path(
    delete,
    path = "/api/watchlist",
    params(WatchlistItemQuery),
    responses(
        (status = 200, description = "Entry removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not tracked"),
        (status = 409, description = "Paid orders cannot be cancelled")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn cancel_watchlist_entry(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<WatchlistService>>,
    Query(query): Query<WatchlistItemQuery>,
) -> Result<Json<ApiResponse<()>>> {
    service.cancel(&user.email, query.product_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Removed from your watchlist".to_string()),
        None,
    )))
}

/// Every order, filterable by buyer email (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrdersQuery),
    responses(
        (status = 200, description = "All orders", body = ApiResponse<Vec<WatchlistEntryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    tag = "watchlist",
    security(("bearer_auth" = []))
)]
pub async fn list_all_orders(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<WatchlistService>>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<ApiResponse<Vec<WatchlistEntryDto>>>> {
    let pagination = query.pagination();
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let (items, total) = service
        .list_all(email, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
