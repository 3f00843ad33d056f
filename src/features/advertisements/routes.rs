use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::features::advertisements::handlers;
use crate::features::advertisements::services::AdvertisementService;

/// Public advertisement routes
pub fn public_routes(service: Arc<AdvertisementService>) -> Router {
    Router::new()
        .route("/api/ads/approved", get(handlers::list_approved_ads))
        .with_state(service)
}

/// Protected advertisement routes
pub fn routes(service: Arc<AdvertisementService>) -> Router {
    Router::new()
        .route(
            "/api/ads",
            get(handlers::list_all_ads).post(handlers::create_ad),
        )
        .route("/api/ads/mine", get(handlers::list_my_ads))
        .route(
            "/api/ads/{id}",
            patch(handlers::update_ad).delete(handlers::delete_ad),
        )
        .route("/api/ads/{id}/approve", put(handlers::approve_ad))
        .route("/api/ads/{id}/reject", put(handlers::reject_ad))
        .with_state(service)
}
