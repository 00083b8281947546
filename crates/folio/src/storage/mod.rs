//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `folio_core::storage`. Projects live in a single SQLite database.

pub mod sqlite;

pub use sqlite::{diagnose, hint_for, DbStatus, SqliteRepository};
