use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::users::models::{User, UserRole};

/// Response DTO for a user record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub previous_role: Option<UserRole>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            previous_role: u.previous_role,
        }
    }
}

/// Query params for role lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleQuery {
    pub email: String,
}

/// Role lookup result. `role` defaults to `user` when no record exists, so
/// callers always get a usable answer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleLookupDto {
    pub role: UserRole,
    pub previous_role: Option<UserRole>,
}

/// Request DTO for an admin changing a user's role
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    pub role: UserRole,
}
