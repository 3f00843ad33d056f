use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::products::dtos::{
    CreateProductDto, PricePointDto, ProductDetailDto, ProductResponseDto, ProductSort,
    UpdateProductDto,
};
use crate::features::products::models::{NewProduct, PricePoint, Product};
use crate::shared::moderation::ApprovalStatus;
use crate::shared::policy::{allows, Action};

const PRODUCT_COLUMNS: &str = "id, vendor_email, vendor_name, market_name, market_description, \
     item_name, item_description, image_url, price_per_unit, date, status, feedback, version, \
     created_at, updated_at";

/// Service for product listings and their moderation workflow
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a new listing. Status is forced to `pending` and ownership is
    /// stamped from the caller; the price history is seeded with one point
    /// at the listing date.
    pub async fn create(
        &self,
        user: &CurrentUser,
        dto: CreateProductDto,
    ) -> Result<ProductResponseDto> {
        let new = NewProduct::from_submission(user, dto, Utc::now().date_naive());
        let seed = new.seed_price();

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (vendor_email, vendor_name, market_name, market_description,
                 item_name, item_description, image_url, price_per_unit, date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new.vendor_email)
        .bind(&new.vendor_name)
        .bind(&new.market_name)
        .bind(&new.market_description)
        .bind(&new.item_name)
        .bind(&new.item_description)
        .bind(&new.image_url)
        .bind(new.price_per_unit)
        .bind(new.date)
        .bind(new.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert product: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO product_prices (product_id, date, price)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(product.id)
        .bind(seed.date)
        .bind(seed.price)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to seed price history: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Product {} submitted by {} (pending review)",
            product.id,
            product.vendor_email
        );
        Ok(product.into())
    }

    /// All listings, any status (admin view, paginated)
    pub async fn list_all(&self, offset: i64, limit: i64) -> Result<(Vec<ProductResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    /// A vendor's own listings, any status (paginated)
    pub async fn list_mine(
        &self,
        vendor_email: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE vendor_email = $1")
                .bind(vendor_email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE vendor_email = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#
        ))
        .bind(vendor_email)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list vendor products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    /// Approved listings for the public catalog (sortable, paginated)
    pub async fn list_approved(
        &self,
        sort: ProductSort,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE status = 'approved'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        // sort.order_by() is a static string from the enum, never user input
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE status = 'approved'
            ORDER BY {}
            OFFSET $1 LIMIT $2
            "#,
            sort.order_by()
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list approved products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    /// Listing detail with full price history
    pub async fn get(&self, id: Uuid) -> Result<ProductDetailDto> {
        let product = self.fetch(id).await?;
        let prices = self.price_history(id).await?;

        Ok(ProductDetailDto {
            product: product.into(),
            prices,
        })
    }

    /// Price-trend series for a listing, oldest first
    pub async fn prices(&self, id: Uuid) -> Result<Vec<PricePointDto>> {
        // 404 for unknown listings instead of an empty series
        self.fetch(id).await?;
        self.price_history(id).await
    }

    /// Owner edit: full resubmission. Resets status to `pending`, clears
    /// any reviewer feedback and records the submitted price in the
    /// listing's history.
    pub async fn update(
        &self,
        user: &CurrentUser,
        id: Uuid,
        dto: UpdateProductDto,
    ) -> Result<ProductResponseDto> {
        let date = dto.date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET market_name = $3, market_description = $4, item_name = $5,
                item_description = $6, image_url = $7, price_per_unit = $8, date = $9,
                status = 'pending', feedback = NULL, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND vendor_email = $2
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&user.email)
        .bind(&dto.market_name)
        .bind(&dto.market_description)
        .bind(&dto.item_name)
        .bind(dto.item_description.unwrap_or_default())
        .bind(&dto.image_url)
        .bind(dto.price_per_unit)
        .bind(date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(product) = product else {
            tx.rollback().await.ok();
            return match self.fetch(id).await {
                Ok(_) => Err(AppError::Forbidden(
                    "Only the owning vendor can edit this listing".to_string(),
                )),
                Err(e) => Err(e),
            };
        };

        sqlx::query(
            r#"
            INSERT INTO product_prices (product_id, date, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, date)
            DO UPDATE SET price = EXCLUDED.price
            "#,
        )
        .bind(product.id)
        .bind(date)
        .bind(dto.price_per_unit)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record price point: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!("Product {} edited, back to pending review", product.id);
        Ok(product.into())
    }

    /// Admin approval. Legal only from `pending`; the precondition is
    /// re-validated inside the UPDATE so a concurrent moderation loses
    /// cleanly with 409 instead of overwriting.
    pub async fn approve(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET status = 'approved', version = version + 1, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to approve product: {:?}", e);
            AppError::Database(e)
        })?;

        match product {
            Some(product) => {
                tracing::info!("Product {} approved", product.id);
                Ok(product.into())
            }
            None => Err(self.moderation_conflict(id).await),
        }
    }

    /// Admin rejection with optional feedback for the vendor. Same
    /// `pending`-only precondition as approval.
    pub async fn reject(&self, id: Uuid, feedback: Option<String>) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET status = 'rejected', feedback = $2, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&feedback)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reject product: {:?}", e);
            AppError::Database(e)
        })?;

        match product {
            Some(product) => {
                tracing::info!("Product {} rejected: {:?}", product.id, feedback);
                Ok(product.into())
            }
            None => Err(self.moderation_conflict(id).await),
        }
    }

    /// Delete a listing: the owning vendor from any state, or an admin.
    pub async fn delete(&self, user: &CurrentUser, id: Uuid) -> Result<()> {
        let result = if allows(user.role, Action::ModerateListing) {
            sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
        } else {
            sqlx::query("DELETE FROM products WHERE id = $1 AND vendor_email = $2")
                .bind(id)
                .bind(&user.email)
                .execute(&self.pool)
                .await
        }
        .map_err(|e| {
            tracing::error!("Failed to delete product: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return match self.fetch(id).await {
                Ok(_) => Err(AppError::Forbidden(
                    "Only the owning vendor or an admin can delete this listing".to_string(),
                )),
                Err(e) => Err(e),
            };
        }

        tracing::info!("Product {} deleted by {}", id, user.email);
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    async fn price_history(&self, id: Uuid) -> Result<Vec<PricePointDto>> {
        let points = sqlx::query_as::<_, PricePoint>(
            r#"
            SELECT date, price
            FROM product_prices
            WHERE product_id = $1
            ORDER BY date
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch price history: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(points.into_iter().map(|p| p.into()).collect())
    }

    /// Explain why a moderation UPDATE matched nothing: the row is either
    /// gone (404) or no longer pending (409).
    async fn moderation_conflict(&self, id: Uuid) -> AppError {
        match self.fetch(id).await {
            // The row can race back to pending via an owner edit; tell the
            // caller to retry rather than claiming a terminal state.
            Ok(product) if product.status.can_moderate() => AppError::Conflict(
                "Listing changed concurrently; retry the moderation".to_string(),
            ),
            Ok(product) => AppError::Conflict(format!(
                "Only pending listings can be moderated; current status is {}",
                product.status
            )),
            Err(e) => e,
        }
    }
}
