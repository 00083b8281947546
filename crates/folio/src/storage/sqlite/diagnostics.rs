//! Connectivity checks used by `folio check-db`.
//!
//! Unlike [`SqliteRepository::new`](super::SqliteRepository::new) these never
//! create the database file or the schema.

use folio_core::storage::{RepositoryError, Result};
use rusqlite::OpenFlags;
use tokio_rusqlite::Connection;

use super::error::map_tokio_rusqlite_error;
use super::schema;

/// What `check-db` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStatus {
    pub projects_table: bool,
    /// Row count, when the table exists.
    pub project_count: Option<i64>,
}

/// Opens an existing database read-only, runs `SELECT 1` and inspects the
/// `projects` table.
pub async fn diagnose(path: &str) -> Result<DbStatus> {
    let opened = if path == ":memory:" {
        Connection::open_in_memory().await
    } else {
        Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .await
    };
    let conn = opened.map_err(map_tokio_rusqlite_error)?;

    conn.call(|conn| {
        let map = tokio_rusqlite::Error::Rusqlite;

        conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
            .map_err(map)?;
        let projects_table = conn
            .query_row(schema::SELECT_PROJECTS_TABLE_EXISTS, [], |row| {
                row.get::<_, bool>(0)
            })
            .map_err(map)?;
        let project_count = if projects_table {
            Some(
                conn.query_row(schema::COUNT_PROJECTS, [], |row| row.get(0))
                    .map_err(map)?,
            )
        } else {
            None
        };

        Ok(DbStatus {
            projects_table,
            project_count,
        })
    })
    .await
    .map_err(map_tokio_rusqlite_error)
}

/// Troubleshooting hint for a failed check.
pub fn hint_for(error: &RepositoryError) -> &'static str {
    let message = error.to_string().to_lowercase();

    if message.contains("unable to open") || message.contains("cannot open") {
        "The database file could not be opened. Check that DATABASE_PATH points to an existing file and that its directory exists."
    } else if message.contains("permission") || message.contains("readonly") {
        "The database file is not accessible. Check file ownership and permissions for the user running folio."
    } else if message.contains("not a database") || message.contains("file is encrypted") {
        "The file exists but is not a SQLite database. Check DATABASE_PATH or move the file aside and run `folio seed`."
    } else if message.contains("locked") || message.contains("busy") {
        "The database is locked by another process. Stop other folio instances and retry."
    } else {
        "Run `folio serve` once to create the schema, or `folio seed` to create it with sample data."
    }
}
