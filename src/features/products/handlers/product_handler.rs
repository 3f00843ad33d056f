use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireAuth, RequireVendor};
use crate::features::products::dtos::{
    ApprovedProductsQuery, CreateProductDto, PricePointDto, ProductDetailDto, ProductResponseDto,
    UpdateProductDto,
};
use crate::features::products::services::ProductService;
use crate::shared::moderation::RejectDto;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit a product listing
///
/// The listing always enters review as `pending`; vendor identity comes
/// from the token.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 200, description = "Listing submitted for review", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product submitted for review".to_string()),
        None,
    )))
}

/// List all listings, any status (paginated)
#[utoipa::path(
    get,
    path = "/api/products",
    params(PaginationQuery),
    responses(
        (status = 200, description = "All listings", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn list_all_products(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service.list_all(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// List the caller's own listings, any status (paginated)
#[utoipa::path(
    get,
    path = "/api/products/mine",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Own listings", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn list_my_products(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<ProductService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (items, total) = service
        .list_mine(&user.email, params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Public catalog of approved listings
#[utoipa::path(
    get,
    path = "/api/products/approved",
    params(ApprovedProductsQuery),
    responses(
        (status = 200, description = "Approved listings", body = ApiResponse<Vec<ProductResponseDto>>)
    ),
    tag = "products"
)]
pub async fn list_approved_products(
    State(service): State<Arc<ProductService>>,
    Query(query): Query<ApprovedProductsQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let pagination = query.pagination();
    let (items, total) = service
        .list_approved(query.sort(), pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Listing detail with price history
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Listing detail", body = ApiResponse<ProductDetailDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductDetailDto>>> {
    let detail = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Price-trend series for a listing
#[utoipa::path(
    get,
    path = "/api/products/{id}/prices",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Price history, oldest first", body = ApiResponse<Vec<PricePointDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn get_price_trends(
    RequireAuth(_user): RequireAuth,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PricePointDto>>>> {
    let prices = service.prices(id).await?;
    Ok(Json(ApiResponse::success(Some(prices), None, None)))
}

/// Edit an owned listing (full resubmission, returns to pending review)
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Listing updated and resubmitted", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated and resubmitted for review".to_string()),
        None,
    )))
}

/// Approve a pending listing
#[utoipa::path(
    put,
    path = "/api/products/{id}/approve",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Listing approved", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Listing is not pending")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn approve_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.approve(id).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product approved".to_string()),
        None,
    )))
}

/// Reject a pending listing with optional feedback
#[utoipa::path(
    put,
    path = "/api/products/{id}/reject",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = RejectDto,
    responses(
        (status = 200, description = "Listing rejected", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Listing is not pending")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn reject_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RejectDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let feedback = dto.feedback.filter(|f| !f.trim().is_empty());

    let product = service.reject(id, feedback).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product rejected".to_string()),
        None,
    )))
}

/// Delete a listing (owner, or admin from any state)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    RequireAuth(user): RequireAuth,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
        None,
    )))
}
