use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireBuyer;
use crate::features::reviews::dtos::{CreateReviewDto, ReviewQuery, ReviewResponseDto};
use crate::features::reviews::services::ReviewService;
use crate::shared::types::ApiResponse;

/// Post a review (buyer accounts only)
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewDto,
    responses(
        (status = 200, description = "Review posted", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - buyer account required"),
        (status = 404, description = "Product not found")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<ReviewService>>,
    AppJson(dto): AppJson<CreateReviewDto>,
) -> Result<Json<ApiResponse<ReviewResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = service.create(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(review),
        Some("Review posted".to_string()),
        None,
    )))
}

/// Reviews for a product
#[utoipa::path(
    get,
    path = "/api/reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Reviews, newest first", body = ApiResponse<Vec<ReviewResponseDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(service): State<Arc<ReviewService>>,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.list_for_product(query.product_id).await?;
    Ok(Json(ApiResponse::success(Some(reviews), None, None)))
}
