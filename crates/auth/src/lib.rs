//! Password and token authentication for zoochat.
//!
//! This crate provides:
//! - Argon2id password hashing
//! - HS256 access tokens
//! - Axum extractors for authenticated and admin callers
//! - The `/register`, `/login` and `/me` routes

mod config;
mod error;
mod extractors;
mod handlers;
mod password;
mod state;
mod tokens;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AdminUser, CurrentUser, OptionalUser};
pub use handlers::auth_routes;
pub use password::{hash_password, verify_password};
pub use state::AuthState;
pub use tokens::{issue_token, verify_token, IssuedToken};
