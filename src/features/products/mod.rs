//! Product listings and their moderation lifecycle.
//!
//! Vendors submit listings, which enter review as `pending`. Admins approve
//! or reject (with feedback); only approved listings reach the public
//! catalog. Each listing carries an append-only price history used for the
//! price-trend views.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products/approved` | Public catalog (sortable, paginated) |
//! | GET | `/api/products/{id}` | Public detail with price history |
//! | GET | `/api/products/{id}/prices` | Price-trend series |
//! | POST | `/api/products` | Submit a listing (vendor) |
//! | GET | `/api/products/mine` | Own listings, any status (vendor) |
//! | PATCH | `/api/products/{id}` | Edit own listing, resets to pending (vendor) |
//! | DELETE | `/api/products/{id}` | Delete own listing (vendor) or any (admin) |
//! | GET | `/api/products` | All listings, any status (admin) |
//! | PUT | `/api/products/{id}/approve` | Approve a pending listing (admin) |
//! | PUT | `/api/products/{id}/reject` | Reject a pending listing (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
