use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::CurrentUser;
use crate::features::dashboard::dtos::{
    AdminSummaryDto, BuyerSummaryDto, DashboardSummaryDto, VendorSummaryDto,
};
use crate::features::users::models::UserRole;

/// Service for dashboard counters
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One summary, shaped by the caller's role.
    pub async fn summary(&self, user: &CurrentUser) -> Result<DashboardSummaryDto> {
        let mut summary = DashboardSummaryDto {
            role: user.role,
            admin: None,
            vendor: None,
            buyer: None,
        };

        match user.role {
            UserRole::Admin => summary.admin = Some(self.admin_summary().await?),
            UserRole::Vendor => summary.vendor = Some(self.vendor_summary(&user.email).await?),
            UserRole::User => summary.buyer = Some(self.buyer_summary(&user.email).await?),
        }

        Ok(summary)
    }

    async fn admin_summary(&self) -> Result<AdminSummaryDto> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM products),
                (SELECT COUNT(*) FROM products WHERE status = 'pending'),
                (SELECT COUNT(*) FROM products WHERE status = 'approved'),
                (SELECT COUNT(*) FROM products WHERE status = 'rejected'),
                (SELECT COUNT(*) FROM advertisements),
                (SELECT COUNT(*) FROM advertisements WHERE status = 'pending'),
                (SELECT COUNT(*) FROM watchlist),
                (SELECT COUNT(*) FROM watchlist WHERE payment_status = 'paid')
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load admin summary: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(AdminSummaryDto {
            total_users: row.0,
            total_products: row.1,
            pending_products: row.2,
            approved_products: row.3,
            rejected_products: row.4,
            total_ads: row.5,
            pending_ads: row.6,
            total_orders: row.7,
            paid_orders: row.8,
        })
    }

    async fn vendor_summary(&self, email: &str) -> Result<VendorSummaryDto> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products WHERE vendor_email = $1),
                (SELECT COUNT(*) FROM products WHERE vendor_email = $1 AND status = 'pending'),
                (SELECT COUNT(*) FROM products WHERE vendor_email = $1 AND status = 'approved'),
                (SELECT COUNT(*) FROM products WHERE vendor_email = $1 AND status = 'rejected'),
                (SELECT COUNT(*) FROM advertisements WHERE created_by = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load vendor summary: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(VendorSummaryDto {
            total_products: row.0,
            pending_products: row.1,
            approved_products: row.2,
            rejected_products: row.3,
            total_ads: row.4,
        })
    }

    async fn buyer_summary(&self, email: &str) -> Result<BuyerSummaryDto> {
        let row = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM watchlist WHERE user_email = $1),
                (SELECT COUNT(*) FROM watchlist WHERE user_email = $1 AND payment_status = 'paid'),
                (SELECT COUNT(*) FROM reviews WHERE user_email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load buyer summary: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(BuyerSummaryDto {
            watchlist_count: row.0,
            paid_orders: row.1,
            reviews_posted: row.2,
        })
    }
}
