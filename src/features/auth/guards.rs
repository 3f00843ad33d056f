//! Role-based route guards.
//!
//! Each guard extracts the [`CurrentUser`] installed by the auth middleware
//! and checks the shared policy table. Because the middleware resolves both
//! the token and the role before any handler runs, a guard can never make a
//! decision against a half-loaded identity: a missing extension means the
//! request never carried a valid token (401), and a failing policy check is
//! a definitive 403.

use crate::core::error::AppError;
use crate::features::auth::model::CurrentUser;
use crate::shared::policy::{allows, Action};
use axum::{extract::FromRequestParts, http::request::Parts};

fn current_user(parts: &mut Parts) -> Result<CurrentUser, AppError> {
    parts
        .extensions
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for any authenticated caller, regardless of role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAuth(user): RequireAuth) { ... }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequireAuth(current_user(parts)?))
    }
}

/// Guard for vendor-only routes (listing submission and management).
pub struct RequireVendor(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireVendor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;

        if !allows(user.role, Action::SubmitListing) {
            return Err(AppError::Forbidden("Vendor access required".to_string()));
        }

        Ok(RequireVendor(user))
    }
}

/// Guard for admin-only routes (moderation, user and order management).
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;

        if !allows(user.role, Action::ModerateListing) {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Guard for buyer routes (watchlist, payments, reviews). Vendors and
/// admins are deliberately excluded from buying flows.
pub struct RequireBuyer(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireBuyer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;

        if !allows(user.role, Action::AddToWatchlist) {
            return Err(AppError::Forbidden(
                "Buyer account required for this action".to_string(),
            ));
        }

        Ok(RequireBuyer(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        create_admin_user, create_buyer_user, create_vendor_user, with_auth,
    };
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    async fn vendor_only(RequireVendor(user): RequireVendor) -> String {
        user.email
    }

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.email
    }

    async fn buyer_only(RequireBuyer(user): RequireBuyer) -> String {
        user.email
    }

    fn guarded_router() -> Router {
        Router::new()
            .route("/vendor", get(vendor_only))
            .route("/admin", get(admin_only))
            .route("/buyer", get(buyer_only))
    }

    #[tokio::test]
    async fn test_unauthenticated_request_is_401() {
        let server = TestServer::new(guarded_router()).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_guard_rejects_vendor_with_403() {
        let router = with_auth(guarded_router(), create_vendor_user());
        let server = TestServer::new(router).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_guard_admits_admin() {
        let router = with_auth(guarded_router(), create_admin_user());
        let server = TestServer::new(router).unwrap();
        let response = server.get("/admin").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.text(), "admin@haatbazaar.test");
    }

    #[tokio::test]
    async fn test_vendor_guard_rejects_buyer_with_403() {
        let router = with_auth(guarded_router(), create_buyer_user());
        let server = TestServer::new(router).unwrap();
        let response = server.get("/vendor").await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_buyer_guard_rejects_admin_and_vendor() {
        for user in [create_admin_user(), create_vendor_user()] {
            let router = with_auth(guarded_router(), user);
            let server = TestServer::new(router).unwrap();
            let response = server.get("/buyer").await;
            assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_buyer_guard_admits_user_role() {
        let router = with_auth(guarded_router(), create_buyer_user());
        let server = TestServer::new(router).unwrap();
        let response = server.get("/buyer").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
}
