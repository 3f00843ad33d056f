use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::payments::clients::PaymentGateway;
use crate::features::payments::dtos::{
    ConfirmPaymentDto, CreatePaymentIntentDto, PaymentIntentResponseDto, PaymentResponseDto,
};
use crate::features::payments::models::{Payment, PaymentRecordStatus};
use crate::features::watchlist::models::WatchlistEntry;
use crate::shared::moderation::PaymentStatus;

const PAYMENT_COLUMNS: &str = "id, watchlist_id, user_email, amount, amount_cents, currency, \
     payment_intent_id, transaction_id, status, created_at, confirmed_at";

/// Convert a decimal amount to the gateway's integer minor units.
/// Fails on amounts that do not land on a whole number of cents.
pub(crate) fn amount_in_cents(amount: Decimal) -> Result<i64> {
    let cents = amount * Decimal::from(100);
    if cents.fract() != Decimal::ZERO {
        return Err(AppError::Internal(format!(
            "Amount {} has sub-cent precision",
            amount
        )));
    }
    cents
        .to_i64()
        .ok_or_else(|| AppError::Internal(format!("Amount {} out of range", amount)))
}

/// Service for the payment flow: record, charge, confirm.
pub struct PaymentService {
    pool: PgPool,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl PaymentService {
    pub fn new(pool: PgPool, gateway: Arc<dyn PaymentGateway>, currency: String) -> Self {
        Self {
            pool,
            gateway,
            currency,
        }
    }

    /// Start a payment for an unpaid order. The amount comes from the
    /// order row, an `initiated` payment record is written BEFORE the
    /// gateway is asked for an intent, and the browser gets the client
    /// secret to collect the card.
    pub async fn create_intent(
        &self,
        user_email: &str,
        dto: CreatePaymentIntentDto,
    ) -> Result<PaymentIntentResponseDto> {
        let entry = sqlx::query_as::<_, WatchlistEntry>(
            r#"
            SELECT id, product_id, user_email, item_name, market_name, price_per_unit,
                   date, payment_status, delivery_status, created_at
            FROM watchlist
            WHERE id = $1
            "#,
        )
        .bind(dto.watchlist_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::NotFound(format!("Watchlist entry {} not found", dto.watchlist_id))
        })?;

        if entry.user_email != user_email {
            return Err(AppError::Forbidden(
                "Only the owner can pay for this order".to_string(),
            ));
        }

        if entry.payment_status == PaymentStatus::Paid {
            return Err(AppError::Conflict(
                "This order is already paid".to_string(),
            ));
        }

        let amount = entry.price_per_unit;
        let amount_cents = amount_in_cents(amount)?;

        let intent = self
            .gateway
            .create_intent(amount_cents, &self.currency, entry.id)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO payments
                (watchlist_id, user_email, amount, amount_cents, currency, payment_intent_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(user_email)
        .bind(amount)
        .bind(amount_cents)
        .bind(&self.currency)
        .bind(&intent.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record initiated payment: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Payment intent {} created for order {} ({} cents)",
            intent.id,
            entry.id,
            amount_cents
        );

        Ok(PaymentIntentResponseDto {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount_cents,
            currency: self.currency.clone(),
        })
    }

    /// Confirm a successful charge: mark the payment record `succeeded`
    /// with the transaction id and flip the order to `paid`, in one
    /// database transaction. Replays of an already-confirmed intent return
    /// the stored record unchanged.
    pub async fn confirm(
        &self,
        user_email: &str,
        dto: ConfirmPaymentDto,
    ) -> Result<PaymentResponseDto> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE payment_intent_id = $1"
        ))
        .bind(&dto.payment_intent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No payment record for intent {}",
                dto.payment_intent_id
            ))
        })?;

        if payment.user_email != user_email {
            return Err(AppError::Forbidden(
                "Only the payer can confirm this payment".to_string(),
            ));
        }

        // Idempotent replay: already confirmed, nothing to change
        if payment.status == PaymentRecordStatus::Succeeded {
            return Ok(payment.into());
        }

        let transaction_id = dto
            .transaction_id
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| dto.payment_intent_id.clone());

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let confirmed = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET status = 'succeeded', transaction_id = $2, confirmed_at = NOW()
            WHERE payment_intent_id = $1 AND status = 'initiated'
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(&dto.payment_intent_id)
        .bind(&transaction_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to confirm payment: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(confirmed) = confirmed else {
            // Lost a race with another confirm of the same intent; the
            // stored row is the authority.
            tx.rollback().await.ok();
            let existing = sqlx::query_as::<_, Payment>(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM payments WHERE payment_intent_id = $1"
            ))
            .bind(&dto.payment_intent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
            return Ok(existing.into());
        };

        sqlx::query(
            r#"
            UPDATE watchlist
            SET payment_status = 'paid'
            WHERE id = $1
            "#,
        )
        .bind(confirmed.watchlist_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark order paid: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Payment {} confirmed, order {} marked paid (txn {})",
            confirmed.id,
            confirmed.watchlist_id,
            transaction_id
        );
        Ok(confirmed.into())
    }

    /// The caller's payment history, newest first
    pub async fn list_mine(&self, user_email: &str) -> Result<Vec<PaymentResponseDto>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE user_email = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list payments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(payments.into_iter().map(|p| p.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_whole_amount_converts_to_cents() {
        assert_eq!(amount_in_cents(Decimal::from(30)).unwrap(), 3000);
    }

    #[test]
    fn test_fractional_amount_converts_exactly() {
        let amount = Decimal::from_str("19.99").unwrap();
        assert_eq!(amount_in_cents(amount).unwrap(), 1999);
    }

    #[test]
    fn test_sub_cent_precision_is_rejected() {
        let amount = Decimal::from_str("10.999").unwrap();
        assert!(amount_in_cents(amount).is_err());
    }
}
