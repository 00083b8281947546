//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::project::Project;
use folio_core::storage::RepositoryError;
use rusqlite::Row;

/// Convert a SQLite row to a Project.
///
/// Expected columns: id, slug, title, short_description, image_url,
/// description, live_demo_url, github_repo_url, screenshots, created_at,
/// updated_at
pub fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
    let screenshots: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(Project {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        short_description: row.get(3)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
        live_demo_url: row.get(6)?,
        github_repo_url: row.get(7)?,
        screenshots: parse_screenshots(&screenshots, 8)?,
        created_at: parse_datetime(&created_at, 9)?,
        updated_at: parse_datetime(&updated_at, 10)?,
    })
}

/// Serialize screenshots to the JSON array stored in the `screenshots` column.
pub fn screenshots_to_json(screenshots: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(screenshots).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Parse the `screenshots` column. NULL-ish or empty text reads as no screenshots.
fn parse_screenshots(s: &str, column: usize) -> rusqlite::Result<Vec<String>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime for SQLite storage.
///
/// Fixed-width microsecond precision with a `Z` suffix, so text ordering in
/// SQL matches chronological ordering.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
