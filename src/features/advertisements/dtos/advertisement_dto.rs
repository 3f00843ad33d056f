use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::advertisements::models::Advertisement;
use crate::shared::moderation::ApprovalStatus;
use crate::shared::validation::IMAGE_URL_REGEX;

fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if !IMAGE_URL_REGEX.is_match(value) {
        return Err(ValidationError::new("invalid_image_url"));
    }
    Ok(())
}

/// Request DTO for submitting an advertisement. No status field: every
/// submission enters review as `pending`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdvertisementDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,
}

/// Request DTO for an owner editing an advertisement (full resubmission)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdvertisementDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,
}

/// Response DTO for an advertisement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertisementResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_by: String,
    pub status: ApprovalStatus,
    pub feedback: Option<String>,
    pub version: i64,
}

impl From<Advertisement> for AdvertisementResponseDto {
    fn from(a: Advertisement) -> Self {
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            image_url: a.image_url,
            created_by: a.created_by,
            status: a.status,
            feedback: a.feedback,
            version: a.version,
        }
    }
}
