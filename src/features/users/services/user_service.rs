use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Identity;
use crate::features::users::dtos::{RoleLookupDto, UserResponseDto};
use crate::features::users::models::{User, UserRole};

/// Service for user records and role assignment
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the caller's record from their proven identity. First contact
    /// inserts with the default `user` role; later logins only refresh the
    /// display name. The role column is never touched here.
    pub async fn upsert_identity(&self, identity: &Identity) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET name = COALESCE(EXCLUDED.name, users.name), updated_at = NOW()
            RETURNING id, email, name, role, previous_role, created_at, updated_at
            "#,
        )
        .bind(&identity.email)
        .bind(&identity.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert user: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(user.into())
    }

    /// Look up the role assignment for an email. Missing record resolves to
    /// the default `user` role rather than an error.
    pub async fn role_for_email(&self, email: &str) -> Result<RoleLookupDto> {
        let row = sqlx::query_as::<_, (UserRole, Option<UserRole>)>(
            r#"
            SELECT role, previous_role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up role: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(resolve_role_row(row))
    }

    /// List all users (admin view, paginated)
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<UserResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })?;

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, previous_role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    /// Change a user's role, recording what it was before. No-op role
    /// changes are rejected so `previous_role` stays meaningful.
    pub async fn update_role(&self, id: Uuid, new_role: UserRole) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET previous_role = role, role = $2, updated_at = NOW()
            WHERE id = $1 AND role <> $2
            RETURNING id, email, name, role, previous_role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new_role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user role: {:?}", e);
            AppError::Database(e)
        })?;

        match user {
            Some(user) => {
                tracing::info!("User {} role changed to {}", user.email, user.role);
                Ok(user.into())
            }
            None => {
                // Either the user is missing or the role is unchanged
                let exists = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users WHERE id = $1",
                )
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

                if exists == 0 {
                    Err(AppError::NotFound(format!("User {} not found", id)))
                } else {
                    Err(AppError::Conflict(format!(
                        "User already has role {}",
                        new_role
                    )))
                }
            }
        }
    }
}

/// Collapse an optional role row into the lookup answer, defaulting to the
/// `user` role when no record exists.
pub(crate) fn resolve_role_row(row: Option<(UserRole, Option<UserRole>)>) -> RoleLookupDto {
    match row {
        Some((role, previous_role)) => RoleLookupDto {
            role,
            previous_role,
        },
        None => RoleLookupDto {
            role: UserRole::User,
            previous_role: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_role_row_defaults_to_user() {
        let resolved = resolve_role_row(None);
        assert_eq!(resolved.role, UserRole::User);
        assert!(resolved.previous_role.is_none());
    }

    #[test]
    fn test_present_role_row_passes_through() {
        let resolved = resolve_role_row(Some((UserRole::Vendor, Some(UserRole::User))));
        assert_eq!(resolved.role, UserRole::Vendor);
        assert_eq!(resolved.previous_role, Some(UserRole::User));
    }
}
