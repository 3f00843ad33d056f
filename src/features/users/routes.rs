use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::{RoleResolver, UserService};

#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<UserService>,
    pub roles: Arc<RoleResolver>,
}

/// Create routes for the users feature (all require authentication)
pub fn routes(service: Arc<UserService>, roles: Arc<RoleResolver>) -> Router {
    let state = UsersState { service, roles };

    Router::new()
        .route(
            "/api/users",
            post(handlers::upsert_user).get(handlers::list_users),
        )
        .route("/api/users/role", get(handlers::get_role))
        .route("/api/users/role/{id}", patch(handlers::update_role))
        .with_state(state)
}
