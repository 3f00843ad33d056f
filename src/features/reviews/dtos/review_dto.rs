use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reviews::models::Review;

/// Request DTO for posting a review. Reviewer name and email are stamped
/// from the token, not the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: i16,

    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Query param for listing reviews
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewQuery {
    pub product_id: Uuid,
}

/// Response DTO for a review
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub user_name: Option<String>,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponseDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            rating: r.rating,
            comment: r.comment,
            user_name: r.user_name,
            user_email: r.user_email,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateReviewDto {
        CreateReviewDto {
            product_id: Uuid::nil(),
            rating: 4,
            comment: "Fresh and fairly priced".to_string(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        for rating in 1..=5 {
            let mut dto = valid_dto();
            dto.rating = rating;
            assert!(dto.validate().is_ok(), "rating {} should pass", rating);
        }

        for rating in [0, 6, -1] {
            let mut dto = valid_dto();
            dto.rating = rating;
            assert!(dto.validate().is_err(), "rating {} should fail", rating);
        }
    }

    #[test]
    fn test_empty_comment_rejected() {
        let mut dto = valid_dto();
        dto.comment = String::new();
        assert!(dto.validate().is_err());
    }
}
