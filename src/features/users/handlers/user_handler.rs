use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireAuth};
use crate::features::auth::model::Identity;
use crate::features::users::dtos::{RoleLookupDto, RoleQuery, UpdateRoleDto, UserResponseDto};
use crate::features::users::routes::UsersState;
use crate::shared::policy::{allows, Action};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Upsert the caller's user record
///
/// Called by the client right after signup or login. Email and name come
/// from the verified token, never from the request body.
#[utoipa::path(
    post,
    path = "/api/users",
    responses(
        (status = 200, description = "User record upserted", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn upsert_user(
    RequireAuth(user): RequireAuth,
    State(state): State<UsersState>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let identity = Identity {
        uid: user.uid,
        email: user.email,
        name: user.name,
    };
    let record = state.service.upsert_identity(&identity).await?;
    Ok(Json(ApiResponse::success(Some(record), None, None)))
}

/// Resolve the role for an email
///
/// Callers may look up their own role; admins may look up anyone's.
#[utoipa::path(
    get,
    path = "/api/users/role",
    params(RoleQuery),
    responses(
        (status = 200, description = "Resolved role", body = ApiResponse<RoleLookupDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your email")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_role(
    RequireAuth(user): RequireAuth,
    State(state): State<UsersState>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<ApiResponse<RoleLookupDto>>> {
    let email = query.email.trim().to_lowercase();

    if email != user.email && !allows(user.role, Action::ManageUsers) {
        return Err(AppError::Forbidden(
            "Cannot look up another user's role".to_string(),
        ));
    }

    let lookup = state.service.role_for_email(&email).await?;
    Ok(Json(ApiResponse::success(Some(lookup), None, None)))
}

/// List all users (paginated)
#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<UsersState>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (items, total) = state.service.list(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Change a user's role
///
/// Records the previous role and invalidates the role-resolver cache so the
/// change takes effect on the target's next request.
#[utoipa::path(
    patch,
    path = "/api/users/role/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has that role")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_role(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<UsersState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRoleDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let updated = state.service.update_role(id, dto.role).await?;
    state.roles.invalidate(&updated.email).await;

    Ok(Json(ApiResponse::success(
        Some(updated),
        Some("User role updated".to_string()),
        None,
    )))
}
