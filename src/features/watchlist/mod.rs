//! Watchlist entries, which double as order records.
//!
//! A buyer tracks an approved product; the entry starts `unpaid` and flips
//! to `paid` through the payment flow. At most one entry exists per
//! (product, buyer) — a database constraint, not a client courtesy.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/watchlist` | Track a product (buyer) |
//! | GET | `/api/watchlist` | Own entries / orders (buyer) |
//! | GET | `/api/watchlist/check?product_id=` | Is the product already tracked |
//! | GET | `/api/watchlist/{id}` | Single entry (payment page) |
//! | DELETE | `/api/watchlist?product_id=` | Cancel an unpaid entry |
//! | GET | `/api/admin/orders` | Every order, filterable by buyer (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::WatchlistService;
