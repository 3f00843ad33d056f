use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::advertisements::dtos::{
    AdvertisementResponseDto, CreateAdvertisementDto, UpdateAdvertisementDto,
};
use crate::features::advertisements::models::{Advertisement, NewAdvertisement};
use crate::features::auth::model::CurrentUser;
use crate::shared::policy::{allows, Action};

const AD_COLUMNS: &str =
    "id, title, description, image_url, created_by, status, feedback, version, created_at, updated_at";

/// Service for advertisements; mirrors the product moderation lifecycle
pub struct AdvertisementService {
    pool: PgPool,
}

impl AdvertisementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        dto: CreateAdvertisementDto,
    ) -> Result<AdvertisementResponseDto> {
        let new = NewAdvertisement::from_submission(user, dto);

        let ad = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            INSERT INTO advertisements (title, description, image_url, created_by, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(&new.created_by)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert advertisement: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Advertisement {} submitted by {}", ad.id, ad.created_by);
        Ok(ad.into())
    }

    /// All ads, any status (admin view, paginated)
    pub async fn list_all(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdvertisementResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM advertisements")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let ads = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM advertisements
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list advertisements: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((ads.into_iter().map(|a| a.into()).collect(), total))
    }

    /// A vendor's own ads, any status
    pub async fn list_mine(
        &self,
        created_by: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdvertisementResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM advertisements WHERE created_by = $1",
        )
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let ads = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM advertisements
            WHERE created_by = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(created_by)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list vendor advertisements: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((ads.into_iter().map(|a| a.into()).collect(), total))
    }

    /// Approved ads for the public highlight carousel
    pub async fn list_approved(&self) -> Result<Vec<AdvertisementResponseDto>> {
        let ads = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM advertisements
            WHERE status = 'approved'
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list approved advertisements: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ads.into_iter().map(|a| a.into()).collect())
    }

    /// Owner edit: full resubmission, back to `pending` with feedback
    /// cleared, exactly like products.
    pub async fn update(
        &self,
        user: &CurrentUser,
        id: Uuid,
        dto: UpdateAdvertisementDto,
    ) -> Result<AdvertisementResponseDto> {
        let ad = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            UPDATE advertisements
            SET title = $3, description = $4, image_url = $5,
                status = 'pending', feedback = NULL, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND created_by = $2
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&user.email)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update advertisement: {:?}", e);
            AppError::Database(e)
        })?;

        match ad {
            Some(ad) => {
                tracing::info!("Advertisement {} edited, back to pending review", ad.id);
                Ok(ad.into())
            }
            None => match self.fetch(id).await {
                Ok(_) => Err(AppError::Forbidden(
                    "Only the owning vendor can edit this advertisement".to_string(),
                )),
                Err(e) => Err(e),
            },
        }
    }

    /// Admin approval, legal only from `pending`
    pub async fn approve(&self, id: Uuid) -> Result<AdvertisementResponseDto> {
        self.moderate(id, "approved", None).await
    }

    /// Admin rejection with optional feedback, legal only from `pending`
    pub async fn reject(
        &self,
        id: Uuid,
        feedback: Option<String>,
    ) -> Result<AdvertisementResponseDto> {
        self.moderate(id, "rejected", feedback).await
    }

    async fn moderate(
        &self,
        id: Uuid,
        target: &str,
        feedback: Option<String>,
    ) -> Result<AdvertisementResponseDto> {
        let ad = sqlx::query_as::<_, Advertisement>(&format!(
            r#"
            UPDATE advertisements
            SET status = $2::approval_status, feedback = $3, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {AD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(target)
        .bind(&feedback)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to moderate advertisement: {:?}", e);
            AppError::Database(e)
        })?;

        match ad {
            Some(ad) => {
                tracing::info!("Advertisement {} {}", ad.id, target);
                Ok(ad.into())
            }
            None => match self.fetch(id).await {
                Ok(ad) => Err(AppError::Conflict(format!(
                    "Only pending advertisements can be moderated; current status is {}",
                    ad.status
                ))),
                Err(e) => Err(e),
            },
        }
    }

    /// Delete an ad: the owning vendor, or an admin.
    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<()> {
        let result = if allows(user.role, Action::ModerateListing) {
            sqlx::query("DELETE FROM advertisements WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
        } else {
            sqlx::query("DELETE FROM advertisements WHERE id = $1 AND created_by = $2")
                .bind(id)
                .bind(&user.email)
                .execute(&self.pool)
                .await
        }
        .map_err(|e| {
            tracing::error!("Failed to delete advertisement: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return match self.fetch(id).await {
                Ok(_) => Err(AppError::Forbidden(
                    "Only the owning vendor or an admin can delete this advertisement".to_string(),
                )),
                Err(e) => Err(e),
            };
        }

        tracing::info!("Advertisement {} deleted by {}", id, user.email);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Advertisement> {
        sqlx::query_as::<_, Advertisement>(&format!(
            "SELECT {AD_COLUMNS} FROM advertisements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Advertisement {} not found", id)))
    }
}
