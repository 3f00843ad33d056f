use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

/// Public review routes (reading requires no account)
pub fn public_routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews", get(handlers::list_reviews))
        .with_state(service)
}

/// Protected review routes
pub fn routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews", post(handlers::create_review))
        .with_state(service)
}
