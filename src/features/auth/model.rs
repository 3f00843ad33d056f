use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::UserRole;

/// What the identity provider vouches for: a stable uid, a verified email
/// and an optional display name. Carries no role — roles are this service's
/// own data, resolved after the token checks out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A fully resolved caller: proven identity plus the role looked up for it.
/// Built exclusively by the auth middleware, so any handler holding one
/// knows both halves resolved before the request reached it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn new(identity: Identity, role: UserRole) -> Self {
        Self {
            uid: identity.uid,
            email: identity.email,
            name: identity.name,
            role,
        }
    }
}
