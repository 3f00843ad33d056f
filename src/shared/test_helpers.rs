#[cfg(test)]
use crate::features::auth::model::{CurrentUser, Identity};
#[cfg(test)]
use crate::features::users::models::UserRole;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_test_user(email: &str, role: UserRole) -> CurrentUser {
    CurrentUser::new(
        Identity {
            uid: format!("uid-{}", email),
            email: email.to_string(),
            name: Some("Test User".to_string()),
        },
        role,
    )
}

#[cfg(test)]
pub fn create_admin_user() -> CurrentUser {
    create_test_user("admin@haatbazaar.test", UserRole::Admin)
}

#[cfg(test)]
pub fn create_vendor_user() -> CurrentUser {
    create_test_user("vendor@haatbazaar.test", UserRole::Vendor)
}

#[cfg(test)]
pub fn create_buyer_user() -> CurrentUser {
    create_test_user("buyer@haatbazaar.test", UserRole::User)
}

/// Layer a router with middleware that injects the given user, standing in
/// for the real token-validation middleware in handler tests.
#[cfg(test)]
pub fn with_auth(router: Router, user: CurrentUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
