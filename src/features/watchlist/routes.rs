use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::watchlist::handlers;
use crate::features::watchlist::services::WatchlistService;

/// Create routes for the watchlist feature (all require authentication)
pub fn routes(service: Arc<WatchlistService>) -> Router {
    Router::new()
        .route(
            "/api/watchlist",
            get(handlers::list_my_watchlist)
                .post(handlers::add_to_watchlist)
                .delete(handlers::cancel_watchlist_entry),
        )
        .route("/api/watchlist/check", get(handlers::check_watchlist))
        .route("/api/watchlist/{id}", get(handlers::get_watchlist_entry))
        .route("/api/admin/orders", get(handlers::list_all_orders))
        .with_state(service)
}
