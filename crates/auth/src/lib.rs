//! Admin authentication for folio.
//!
//! This crate provides:
//! - Configuration for the single admin credential and session signing
//! - Signed `session` cookie issue and validation
//! - Axum extractors for authentication
//! - JSON login/logout routes

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AdminSession, OptionalAdmin};
pub use handlers::auth_routes;
pub use state::AuthState;
