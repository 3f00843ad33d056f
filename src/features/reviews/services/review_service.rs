use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::reviews::dtos::{CreateReviewDto, ReviewResponseDto};
use crate::features::reviews::models::Review;

const REVIEW_COLUMNS: &str =
    "id, product_id, rating, comment, user_name, user_email, created_at";

/// Service for product reviews
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Post a review. Reviewer identity comes from the token; the review is
    /// immutable afterwards.
    pub async fn create(&self, user: &CurrentUser, dto: CreateReviewDto) -> Result<ReviewResponseDto> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE id = $1")
            .bind(dto.product_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if exists == 0 {
            return Err(AppError::NotFound(format!(
                "Product {} not found",
                dto.product_id
            )));
        }

        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (product_id, rating, comment, user_name, user_email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(dto.product_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert review: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Review {} posted on product {} by {}",
            review.id,
            review.product_id,
            review.user_email
        );
        Ok(review.into())
    }

    /// Reviews for a product, newest first
    pub async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<ReviewResponseDto>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reviews: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(reviews.into_iter().map(|r| r.into()).collect())
    }
}
