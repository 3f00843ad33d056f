use sqlx::PgPool;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::users::models::UserRole;

use super::user_service::resolve_role_row;

struct CachedRole {
    role: UserRole,
    resolved_at: Instant,
}

/// Resolves the role for an authenticated email, with a per-email TTL cache
/// so the hot path of every protected request is not a role query.
///
/// The cache is the single source of truth for "current role" inside a
/// request window; the admin role-change path calls [`invalidate`] so a
/// promotion or demotion takes effect on the next request, not after the
/// TTL runs out.
///
/// [`invalidate`]: RoleResolver::invalidate
pub struct RoleResolver {
    pool: PgPool,
    cache: RwLock<HashMap<String, CachedRole>>,
    ttl: Duration,
}

impl RoleResolver {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self {
            pool,
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Resolve the role for an email, defaulting to `user` when the email
    /// has no record. A database failure is returned, not swallowed.
    pub async fn resolve(&self, email: &str) -> Result<UserRole> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(email) {
                if cached.resolved_at.elapsed() < self.ttl {
                    return Ok(cached.role);
                }
            }
        }

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
            tracing::error!("Role resolution failed for {}: {:?}", email, e);
            AppError::Database(e)
        })?;

        let role = resolve_role_row(row).role;

        let mut cache = self.cache.write().await;
        cache.insert(
            email.to_string(),
            CachedRole {
                role,
                resolved_at: Instant::now(),
            },
        );

        Ok(role)
    }

    /// Drop the cached role for an email. Called after an admin changes a
    /// role so the new assignment is visible immediately.
    pub async fn invalidate(&self, email: &str) {
        let mut cache = self.cache.write().await;
        cache.remove(email);
    }
}
