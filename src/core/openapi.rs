use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::advertisements::{
    dtos as ads_dtos, handlers as ads_handlers,
};
use crate::features::auth::model::CurrentUser;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::payments::{
    dtos as payments_dtos, handlers as payments_handlers, models as payments_models,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::features::users::models::UserRole;
use crate::features::watchlist::{dtos as watchlist_dtos, handlers as watchlist_handlers};
use crate::shared::moderation::{ApprovalStatus, PaymentStatus, RejectDto};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::upsert_user,
        users_handlers::get_role,
        users_handlers::list_users,
        users_handlers::update_role,
        // Products
        products_handlers::create_product,
        products_handlers::list_all_products,
        products_handlers::list_my_products,
        products_handlers::list_approved_products,
        products_handlers::get_product,
        products_handlers::get_price_trends,
        products_handlers::update_product,
        products_handlers::approve_product,
        products_handlers::reject_product,
        products_handlers::delete_product,
        // Advertisements
        ads_handlers::create_ad,
        ads_handlers::list_all_ads,
        ads_handlers::list_my_ads,
        ads_handlers::list_approved_ads,
        ads_handlers::update_ad,
        ads_handlers::approve_ad,
        ads_handlers::reject_ad,
        ads_handlers::delete_ad,
        // Watchlist / orders
        watchlist_handlers::add_to_watchlist,
        watchlist_handlers::list_my_watchlist,
        watchlist_handlers::check_watchlist,
        watchlist_handlers::get_watchlist_entry,
        watchlist_handlers::cancel_watchlist_entry,
        watchlist_handlers::list_all_orders,
        // Payments
        payments_handlers::create_payment_intent,
        payments_handlers::confirm_payment,
        payments_handlers::list_my_payments,
        // Reviews
        reviews_handlers::create_review,
        reviews_handlers::list_reviews,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            ApprovalStatus,
            PaymentStatus,
            RejectDto,
            UserRole,
            CurrentUser,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::RoleLookupDto,
            users_dtos::UpdateRoleDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            ApiResponse<users_dtos::RoleLookupDto>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ProductResponseDto,
            products_dtos::ProductDetailDto,
            products_dtos::PricePointDto,
            products_dtos::ProductSort,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductDetailDto>,
            ApiResponse<Vec<products_dtos::PricePointDto>>,
            // Advertisements
            ads_dtos::CreateAdvertisementDto,
            ads_dtos::UpdateAdvertisementDto,
            ads_dtos::AdvertisementResponseDto,
            ApiResponse<ads_dtos::AdvertisementResponseDto>,
            ApiResponse<Vec<ads_dtos::AdvertisementResponseDto>>,
            // Watchlist
            watchlist_dtos::AddWatchlistDto,
            watchlist_dtos::WatchlistCheckDto,
            watchlist_dtos::WatchlistEntryDto,
            ApiResponse<watchlist_dtos::WatchlistEntryDto>,
            ApiResponse<Vec<watchlist_dtos::WatchlistEntryDto>>,
            ApiResponse<watchlist_dtos::WatchlistCheckDto>,
            // Payments
            payments_models::PaymentRecordStatus,
            payments_dtos::CreatePaymentIntentDto,
            payments_dtos::PaymentIntentResponseDto,
            payments_dtos::ConfirmPaymentDto,
            payments_dtos::PaymentResponseDto,
            ApiResponse<payments_dtos::PaymentIntentResponseDto>,
            ApiResponse<payments_dtos::PaymentResponseDto>,
            ApiResponse<Vec<payments_dtos::PaymentResponseDto>>,
            // Reviews
            reviews_dtos::CreateReviewDto,
            reviews_dtos::ReviewResponseDto,
            ApiResponse<reviews_dtos::ReviewResponseDto>,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            // Dashboard
            dashboard_dtos::AdminSummaryDto,
            dashboard_dtos::VendorSummaryDto,
            dashboard_dtos::BuyerSummaryDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "users", description = "User records and role assignment"),
        (name = "products", description = "Product listings and moderation"),
        (name = "advertisements", description = "Vendor advertisements and moderation"),
        (name = "watchlist", description = "Watchlist / order tracking"),
        (name = "payments", description = "Card payments for orders"),
        (name = "reviews", description = "Product reviews"),
        (name = "dashboard", description = "Role-shaped dashboard counters"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "HaatBazaar API",
        version = "0.1.0",
        description = "API documentation for HaatBazaar",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
