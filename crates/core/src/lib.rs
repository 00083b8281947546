//! Domain core for folio: project records, image references, session tokens
//! and the storage traits the server implements.

#[cfg(feature = "auth")]
pub mod auth;
pub mod images;
pub mod project;
pub mod serde;
pub mod storage;
