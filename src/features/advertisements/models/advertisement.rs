use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::auth::model::CurrentUser;
use crate::features::advertisements::dtos::CreateAdvertisementDto;
use crate::shared::moderation::ApprovalStatus;

/// Database model for an advertisement
#[derive(Debug, Clone, FromRow)]
pub struct Advertisement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_by: String,
    pub status: ApprovalStatus,
    pub feedback: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert data for a new advertisement. Ownership comes from the token and
/// the workflow state is fixed; the DTO offers neither.
#[derive(Debug)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub created_by: String,
    pub status: ApprovalStatus,
}

impl NewAdvertisement {
    pub fn from_submission(user: &CurrentUser, dto: CreateAdvertisementDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            image_url: dto.image_url,
            created_by: user.email.clone(),
            status: ApprovalStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::create_test_user;

    #[test]
    fn test_new_ad_is_pending_and_owner_stamped() {
        let vendor = create_test_user("vendor@haatbazaar.test", UserRole::Vendor);
        let dto = CreateAdvertisementDto {
            title: "Super Discount on Local Veggies!".to_string(),
            description: "Fresh from the market".to_string(),
            image_url: "https://example.com/banner.jpg".to_string(),
        };

        let new = NewAdvertisement::from_submission(&vendor, dto);

        assert_eq!(new.status, ApprovalStatus::Pending);
        assert_eq!(new.created_by, "vendor@haatbazaar.test");
    }
}
