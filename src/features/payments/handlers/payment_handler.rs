use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireBuyer;
use crate::features::payments::dtos::{
    ConfirmPaymentDto, CreatePaymentIntentDto, PaymentIntentResponseDto, PaymentResponseDto,
};
use crate::features::payments::services::PaymentService;
use crate::shared::types::ApiResponse;

/// Start a payment for an unpaid order
///
/// Records the payment before asking the gateway for a charge intent; the
/// returned client secret lets the browser collect the card.
#[utoipa::path(
    post,
    path = "/api/create-payment-intent",
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 200, description = "Charge intent created", body = ApiResponse<PaymentIntentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the order owner"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already paid"),
        (status = 502, description = "Payment gateway error")
    ),
    tag = "payments",
    security(("bearer_auth" = []))
)]
pub async fn create_payment_intent(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<PaymentService>>,
    AppJson(dto): AppJson<CreatePaymentIntentDto>,
) -> Result<Json<ApiResponse<PaymentIntentResponseDto>>> {
    let intent = service.create_intent(&user.email, dto).await?;
    Ok(Json(ApiResponse::success(Some(intent), None, None)))
}

/// Confirm a successful charge
///
/// Marks the payment record succeeded and flips the order to paid in one
/// transaction; replays are idempotent.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = ConfirmPaymentDto,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PaymentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the payer"),
        (status = 404, description = "No payment record for that intent")
    ),
    tag = "payments",
    security(("bearer_auth" = []))
)]
pub async fn confirm_payment(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<PaymentService>>,
    AppJson(dto): AppJson<ConfirmPaymentDto>,
) -> Result<Json<ApiResponse<PaymentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let payment = service.confirm(&user.email, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(payment),
        Some("Payment recorded".to_string()),
        None,
    )))
}

/// The caller's payment history
#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payment history", body = ApiResponse<Vec<PaymentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "payments",
    security(("bearer_auth" = []))
)]
pub async fn list_my_payments(
    RequireBuyer(user): RequireBuyer,
    State(service): State<Arc<PaymentService>>,
) -> Result<Json<ApiResponse<Vec<PaymentResponseDto>>>> {
    let payments = service.list_mine(&user.email).await?;
    Ok(Json(ApiResponse::success(Some(payments), None, None)))
}
