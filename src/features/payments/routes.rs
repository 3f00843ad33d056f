use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::payments::handlers;
use crate::features::payments::services::PaymentService;

/// Create routes for the payments feature (all require authentication)
pub fn routes(service: Arc<PaymentService>) -> Router {
    Router::new()
        .route(
            "/api/create-payment-intent",
            post(handlers::create_payment_intent),
        )
        .route(
            "/api/payments",
            get(handlers::list_my_payments).post(handlers::confirm_payment),
        )
        .with_state(service)
}
