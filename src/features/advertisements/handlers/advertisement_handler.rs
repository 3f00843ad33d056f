use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::advertisements::dtos::{
    AdvertisementResponseDto, CreateAdvertisementDto, UpdateAdvertisementDto,
};
use crate::features::advertisements::services::AdvertisementService;
use crate::features::auth::guards::{RequireAdmin, RequireAuth, RequireVendor};
use crate::shared::moderation::RejectDto;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Submit an advertisement (enters review as pending)
#[utoipa::path(
    post,
    path = "/api/ads",
    request_body = CreateAdvertisementDto,
    responses(
        (status = 200, description = "Advertisement submitted for review", body = ApiResponse<AdvertisementResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn create_ad(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<AdvertisementService>>,
    AppJson(dto): AppJson<CreateAdvertisementDto>,
) -> Result<Json<ApiResponse<AdvertisementResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ad = service.create(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ad),
        Some("Advertisement submitted for review".to_string()),
        None,
    )))
}

/// List all advertisements, any status (paginated)
#[utoipa::path(
    get,
    path = "/api/ads",
    params(PaginationQuery),
    responses(
        (status = 200, description = "All advertisements", body = ApiResponse<Vec<AdvertisementResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn list_all_ads(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdvertisementService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdvertisementResponseDto>>>> {
    let (items, total) = service.list_all(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// List the caller's own advertisements
#[utoipa::path(
    get,
    path = "/api/ads/mine",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Own advertisements", body = ApiResponse<Vec<AdvertisementResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - vendor access required")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn list_my_ads(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<AdvertisementService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdvertisementResponseDto>>>> {
    let (items, total) = service
        .list_mine(&user.email, params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Approved advertisements for the public highlights
#[utoipa::path(
    get,
    path = "/api/ads/approved",
    responses(
        (status = 200, description = "Approved advertisements", body = ApiResponse<Vec<AdvertisementResponseDto>>)
    ),
    tag = "advertisements"
)]
pub async fn list_approved_ads(
    State(service): State<Arc<AdvertisementService>>,
) -> Result<Json<ApiResponse<Vec<AdvertisementResponseDto>>>> {
    let ads = service.list_approved().await?;
    Ok(Json(ApiResponse::success(Some(ads), None, None)))
}

/// Edit an owned advertisement (returns to pending review)
#[utoipa::path(
    patch,
    path = "/api/ads/{id}",
    params(("id" = Uuid, Path, description = "Advertisement id")),
    request_body = UpdateAdvertisementDto,
    responses(
        (status = 200, description = "Advertisement updated and resubmitted", body = ApiResponse<AdvertisementResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Advertisement not found")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn update_ad(
    RequireVendor(user): RequireVendor,
    State(service): State<Arc<AdvertisementService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAdvertisementDto>,
) -> Result<Json<ApiResponse<AdvertisementResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ad = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(ad),
        Some("Advertisement updated and resubmitted for review".to_string()),
        None,
    )))
}

/// Approve a pending advertisement
#[utoipa::path(
    put,
    path = "/api/ads/{id}/approve",
    params(("id" = Uuid, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Advertisement approved", body = ApiResponse<AdvertisementResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "Advertisement not found"),
        (status = 409, description = "Advertisement is not pending")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn approve_ad(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdvertisementService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdvertisementResponseDto>>> {
    let ad = service.approve(id).await?;
    Ok(Json(ApiResponse::success(
        Some(ad),
        Some("Advertisement approved".to_string()),
        None,
    )))
}

/// Reject a pending advertisement with optional feedback
#[utoipa::path(
    put,
    path = "/api/ads/{id}/reject",
    params(("id" = Uuid, Path, description = "Advertisement id")),
    request_body = RejectDto,
    responses(
        (status = 200, description = "Advertisement rejected", body = ApiResponse<AdvertisementResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "Advertisement not found"),
        (status = 409, description = "Advertisement is not pending")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn reject_ad(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdvertisementService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RejectDto>,
) -> Result<Json<ApiResponse<AdvertisementResponseDto>>> {
    let feedback = dto.feedback.filter(|f| !f.trim().is_empty());

    let ad = service.reject(id, feedback).await?;
    Ok(Json(ApiResponse::success(
        Some(ad),
        Some("Advertisement rejected".to_string()),
        None,
    )))
}

/// Delete an advertisement (owner, or admin)
#[utoipa::path(
    delete,
    path = "/api/ads/{id}",
    params(("id" = Uuid, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Advertisement deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owner"),
        (status = 404, description = "Advertisement not found")
    ),
    tag = "advertisements",
    security(("bearer_auth" = []))
)]
pub async fn delete_ad(
    RequireAuth(user): RequireAuth,
    State(service): State<Arc<AdvertisementService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Advertisement deleted".to_string()),
        None,
    )))
}
