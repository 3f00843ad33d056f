//! Product reviews: buyers rate 1-5 with a comment, immutable once posted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReviewService;
