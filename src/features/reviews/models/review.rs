use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a review
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub user_name: Option<String>,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}
