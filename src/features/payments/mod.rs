//! Card payments for watchlist orders.
//!
//! The gateway is an external collaborator behind the [`PaymentGateway`]
//! trait. A payment row is recorded as `initiated` before the charge is
//! attempted and confirmed idempotently afterwards, so a crash between
//! charge and confirmation leaves a reconcilable record instead of a
//! silently inconsistent order.
//!
//! [`PaymentGateway`]: clients::PaymentGateway

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PaymentService;
