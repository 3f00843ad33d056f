//! User records and role assignment.
//!
//! Identity lives in the external provider; this feature keeps the role
//! each email resolves to, plus the admin surface for changing it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/users` | Upsert the caller's user record after signup/login |
//! | GET | `/api/users/role?email=` | Resolve role for an email (self, or admin) |
//! | GET | `/api/users` | List all users (admin, paginated) |
//! | PATCH | `/api/users/role/{id}` | Change a user's role (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{RoleResolver, UserService};
