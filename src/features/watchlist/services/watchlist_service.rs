use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::watchlist::dtos::WatchlistEntryDto;
use crate::features::watchlist::models::WatchlistEntry;
use crate::shared::moderation::ApprovalStatus;

const ENTRY_COLUMNS: &str = "id, product_id, user_email, item_name, market_name, price_per_unit, \
     date, payment_status, delivery_status, created_at";

/// Service for watchlist entries / orders
pub struct WatchlistService {
    pool: PgPool,
}

impl WatchlistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Track a product for a buyer. The item/market/price snapshot is
    /// copied from the listing inside the INSERT, and the unique
    /// (product, buyer) constraint turns a concurrent duplicate add into a
    /// clean 409 instead of a second row.
    pub async fn add(&self, user_email: &str, product_id: Uuid) -> Result<WatchlistEntryDto> {
        let status = sqlx::query_scalar::<_, ApprovalStatus>(
            "SELECT status FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

        if status != ApprovalStatus::Approved {
            return Err(AppError::Conflict(
                "Only approved products can be added to a watchlist".to_string(),
            ));
        }

        let result = sqlx::query_as::<_, WatchlistEntry>(&format!(
            r#"
            INSERT INTO watchlist (product_id, user_email, item_name, market_name, price_per_unit, date)
            SELECT p.id, $2, p.item_name, p.market_name, p.price_per_unit, p.date
            FROM products p
            WHERE p.id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(product_id)
        .bind(user_email)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(entry) => {
                tracing::info!("{} added product {} to watchlist", user_email, product_id);
                Ok(entry.into())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                "Product is already in your watchlist".to_string(),
            )),
            // Listing deleted between the status check and the insert
            Err(sqlx::Error::RowNotFound) => Err(AppError::NotFound(format!(
                "Product {} not found",
                product_id
            ))),
            Err(e) => {
                tracing::error!("Failed to add watchlist entry: {:?}", e);
                Err(AppError::Database(e))
            }
        }
    }

    /// The caller's entries, newest first
    pub async fn list_mine(&self, user_email: &str) -> Result<Vec<WatchlistEntryDto>> {
        let entries = sqlx::query_as::<_, WatchlistEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM watchlist
            WHERE user_email = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list watchlist: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    /// Whether the caller already tracks a product. Authoritative: this is
    /// the same table the unique constraint lives on.
    pub async fn contains(&self, user_email: &str, product_id: Uuid) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM watchlist WHERE product_id = $1 AND user_email = $2",
        )
        .bind(product_id)
        .bind(user_email)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(count > 0)
    }

    /// A single entry, visible only to its owner (payment page)
    pub async fn get_owned(&self, id: Uuid, user_email: &str) -> Result<WatchlistEntryDto> {
        let entry = sqlx::query_as::<_, WatchlistEntry>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM watchlist WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Watchlist entry {} not found", id)))?;

        if entry.user_email != user_email {
            return Err(AppError::Forbidden(
                "Watchlist entries are visible to their owner only".to_string(),
            ));
        }

        Ok(entry.into())
    }

    /// Cancel (remove) an unpaid entry. Paid orders stay on record.
    pub async fn cancel(&self, user_email: &str, product_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM watchlist
            WHERE product_id = $1 AND user_email = $2 AND payment_status = 'unpaid'
            "#,
        )
        .bind(product_id)
        .bind(user_email)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to cancel watchlist entry: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            let exists = self.contains(user_email, product_id).await?;
            return if exists {
                Err(AppError::Conflict(
                    "Paid orders cannot be cancelled".to_string(),
                ))
            } else {
                Err(AppError::NotFound(
                    "Product is not in your watchlist".to_string(),
                ))
            };
        }

        tracing::info!("{} removed product {} from watchlist", user_email, product_id);
        Ok(())
    }

    /// Every order, optionally filtered by buyer email (admin view)
    pub async fn list_all(
        &self,
        buyer_email: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<WatchlistEntryDto>, i64)> {
        let total = match buyer_email {
            Some(email) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM watchlist WHERE user_email = $1")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM watchlist")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(AppError::Database)?;

        let entries = match buyer_email {
            Some(email) => {
                sqlx::query_as::<_, WatchlistEntry>(&format!(
                    r#"
                    SELECT {ENTRY_COLUMNS}
                    FROM watchlist
                    WHERE user_email = $1
                    ORDER BY created_at DESC
                    OFFSET $2 LIMIT $3
                    "#
                ))
                .bind(email)
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, WatchlistEntry>(&format!(
                    r#"
                    SELECT {ENTRY_COLUMNS}
                    FROM watchlist
                    ORDER BY created_at DESC
                    OFFSET $1 LIMIT $2
                    "#
                ))
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list orders: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((entries.into_iter().map(|e| e.into()).collect(), total))
    }
}
