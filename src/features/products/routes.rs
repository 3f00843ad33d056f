use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Public product routes (no authentication)
pub fn public_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products/approved",
            get(handlers::list_approved_products),
        )
        .route("/api/products/{id}", get(handlers::get_product))
        .with_state(service)
}

/// Protected product routes (submission, vendor/admin views, moderation)
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handlers::list_all_products).post(handlers::create_product),
        )
        .route("/api/products/mine", get(handlers::list_my_products))
        .route("/api/products/{id}/prices", get(handlers::get_price_trends))
        .route(
            "/api/products/{id}",
            patch(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/api/products/{id}/approve", put(handlers::approve_product))
        .route("/api/products/{id}/reject", put(handlers::reject_product))
        .with_state(service)
}
