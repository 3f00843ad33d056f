use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::{PricePoint, Product};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::moderation::ApprovalStatus;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::IMAGE_URL_REGEX;

fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value <= &Decimal::ZERO {
        return Err(ValidationError::new("price_not_positive"));
    }
    Ok(())
}

fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if !IMAGE_URL_REGEX.is_match(value) {
        return Err(ValidationError::new("invalid_image_url"));
    }
    Ok(())
}

/// Request DTO for a vendor submitting a listing.
///
/// Deliberately carries no status and no vendor fields: the workflow state
/// is forced to `pending` and ownership is stamped from the token.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200))]
    pub market_name: String,

    #[validate(length(min = 1, max = 2000))]
    pub market_description: String,

    #[validate(length(min = 1, max = 200))]
    pub item_name: String,

    pub item_description: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[validate(custom(function = "validate_price"))]
    pub price_per_unit: Decimal,

    /// Listing date; defaults to today when omitted
    pub date: Option<NaiveDate>,
}

/// Request DTO for an owner editing a listing (full resubmission).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 200))]
    pub market_name: String,

    #[validate(length(min = 1, max = 2000))]
    pub market_description: String,

    #[validate(length(min = 1, max = 200))]
    pub item_name: String,

    pub item_description: Option<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[validate(custom(function = "validate_price"))]
    pub price_per_unit: Decimal,

    pub date: Option<NaiveDate>,
}

/// Sort orders for the public catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Newest,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    pub fn order_by(self) -> &'static str {
        match self {
            ProductSort::Newest => "date DESC, created_at DESC",
            ProductSort::PriceAsc => "price_per_unit ASC",
            ProductSort::PriceDesc => "price_per_unit DESC",
        }
    }
}

/// Query params for the public catalog
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovedProductsQuery {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Sort order (default: newest)
    pub sort: Option<ProductSort>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ApprovedProductsQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn sort(&self) -> ProductSort {
        self.sort.unwrap_or(ProductSort::Newest)
    }
}

/// Response DTO for a product listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
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
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            vendor_email: p.vendor_email,
            vendor_name: p.vendor_name,
            market_name: p.market_name,
            market_description: p.market_description,
            item_name: p.item_name,
            item_description: p.item_description,
            image_url: p.image_url,
            price_per_unit: p.price_per_unit,
            date: p.date,
            status: p.status,
            feedback: p.feedback,
            version: p.version,
        }
    }
}

/// One price-history point on the wire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePointDto {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl From<PricePoint> for PricePointDto {
    fn from(p: PricePoint) -> Self {
        Self {
            date: p.date,
            price: p.price,
        }
    }
}

/// Detail view: the listing plus its full price history, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailDto {
    #[serde(flatten)]
    pub product: ProductResponseDto,
    pub prices: Vec<PricePointDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateProductDto {
        CreateProductDto {
            market_name: "Kawran Bazar".to_string(),
            market_description: "Wholesale market".to_string(),
            item_name: "Onion".to_string(),
            item_description: None,
            image_url: "https://cdn.example.com/onion.jpg".to_string(),
            price_per_unit: Decimal::from(30),
            date: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_zero_or_negative_price_rejected() {
        let mut dto = valid_dto();
        dto.price_per_unit = Decimal::ZERO;
        assert!(dto.validate().is_err());

        dto.price_per_unit = Decimal::from(-5);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_bad_image_url_rejected() {
        let mut dto = valid_dto();
        dto.image_url = "not-a-url".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_empty_item_name_rejected() {
        let mut dto = valid_dto();
        dto.item_name = String::new();
        assert!(dto.validate().is_err());
    }
}
