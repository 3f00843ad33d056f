use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::auth::model::CurrentUser;
use crate::features::products::dtos::CreateProductDto;
use crate::shared::moderation::ApprovalStatus;

/// Database model for a product listing
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub vendor_email: String,
    pub vendor_name: Option<String>,
    pub market_name: String,
    pub market_description: String,
    pub item_name: String,
    pub item_description: String,
    pub image_url: String,
    pub price_per_unit: Decimal,
    pub date: NaiveDate,
    pub status: ApprovalStatus,
    pub feedback: Option<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One point of a listing's price history
#[derive(Debug, Clone, FromRow)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Insert data for a new listing. Built only from a proven identity plus
/// the submission DTO — the DTO has no status or ownership fields, so a
/// submission cannot smuggle either in.
#[derive(Debug)]
pub struct NewProduct {
    pub vendor_email: String,
    pub vendor_name: Option<String>,
    pub market_name: String,
    pub market_description: String,
    pub item_name: String,
    pub item_description: String,
    pub image_url: String,
    pub price_per_unit: Decimal,
    pub date: NaiveDate,
    pub status: ApprovalStatus,
}

impl NewProduct {
    /// Stamp ownership from the caller and force the workflow entry state.
    pub fn from_submission(user: &CurrentUser, dto: CreateProductDto, today: NaiveDate) -> Self {
        Self {
            vendor_email: user.email.clone(),
            vendor_name: user.name.clone(),
            market_name: dto.market_name,
            market_description: dto.market_description,
            item_name: dto.item_name,
            item_description: dto.item_description.unwrap_or_default(),
            image_url: dto.image_url,
            price_per_unit: dto.price_per_unit,
            date: dto.date.unwrap_or(today),
            status: ApprovalStatus::Pending,
        }
    }

    /// The price history a fresh listing starts with: one point at the
    /// listing date.
    pub fn seed_price(&self) -> PricePoint {
        PricePoint {
            date: self.date,
            price: self.price_per_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::create_test_user;

    fn onion_submission() -> CreateProductDto {
        CreateProductDto {
            market_name: "Kawran Bazar".to_string(),
            market_description: "Wholesale market, est. 1950".to_string(),
            item_name: "Onion".to_string(),
            item_description: None,
            image_url: "https://cdn.example.com/onion.jpg".to_string(),
            price_per_unit: Decimal::from(30),
            date: None,
        }
    }

    #[test]
    fn test_new_listing_is_pending_and_owner_stamped() {
        let vendor = create_test_user("vendor@haatbazaar.test", UserRole::Vendor);
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        let new = NewProduct::from_submission(&vendor, onion_submission(), today);

        assert_eq!(new.status, ApprovalStatus::Pending);
        assert_eq!(new.vendor_email, "vendor@haatbazaar.test");
        assert_eq!(new.date, today);
    }

    #[test]
    fn test_price_history_seeded_with_submission_price() {
        let vendor = create_test_user("vendor@haatbazaar.test", UserRole::Vendor);
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

        let new = NewProduct::from_submission(&vendor, onion_submission(), today);
        let seed = new.seed_price();

        assert_eq!(seed.date, today);
        assert_eq!(seed.price, Decimal::from(30));
    }

    #[test]
    fn test_explicit_submission_date_wins_over_today() {
        let vendor = create_test_user("vendor@haatbazaar.test", UserRole::Vendor);
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let submitted = NaiveDate::from_ymd_opt(2025, 8, 28).unwrap();

        let mut dto = onion_submission();
        dto.date = Some(submitted);

        let new = NewProduct::from_submission(&vendor, dto, today);
        assert_eq!(new.date, submitted);
        assert_eq!(new.seed_price().date, submitted);
    }
}
