//! SQLite repository implementation.
//!
//! Implements `ProjectRepository` from `folio_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use folio_core::project::{NewProject, Project};
use folio_core::storage::{ProjectRepository, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_project, screenshots_to_json};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_slug};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based project repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) the database at `path`.
    ///
    /// `:memory:` opens a private in-memory database. Schema tables are
    /// created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        if path == ":memory:" {
            return Self::new_in_memory().await;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl ProjectRepository for SqliteRepository {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(&schema::select_all_projects())
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_project).map_err(wrap_err)?;

                let mut projects = Vec::new();
                for row_result in rows {
                    projects.push(row_result.map_err(wrap_err)?);
                }
                Ok(projects)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let slug_owned = slug.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(
                    &schema::select_project_by_slug(),
                    [&slug_owned],
                    row_to_project,
                )
                .optional()
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_slug(e, slug))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let slug_owned = slug.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_SLUG_EXISTS, [&slug_owned], |row| {
                    row.get::<_, bool>(0)
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_slug(e, slug))
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let now = format_datetime(&Utc::now());
        let screenshots = screenshots_to_json(&project.screenshots)?;
        let p = project.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PROJECT,
                    rusqlite::params![
                        p.slug,
                        p.title,
                        p.short_description,
                        p.image_url,
                        p.description,
                        p.live_demo_url,
                        p.github_repo_url,
                        screenshots,
                        now,
                        now,
                    ],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                conn.query_row(&schema::select_project_by_id(), [id], row_to_project)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_slug(e, &project.slug))
    }

    async fn update_project(&self, current_slug: &str, project: &Project) -> Result<Project> {
        let current = current_slug.to_string();
        let updated_at = format_datetime(&project.updated_at);
        let screenshots = screenshots_to_json(&project.screenshots)?;
        let p = project.clone();

        self.conn
            .call(move |conn| {
                let changed = conn
                    .execute(
                        schema::UPDATE_PROJECT,
                        rusqlite::params![
                            current,
                            p.slug,
                            p.title,
                            p.short_description,
                            p.image_url,
                            p.description,
                            p.live_demo_url,
                            p.github_repo_url,
                            screenshots,
                            updated_at,
                        ],
                    )
                    .map_err(wrap_err)?;

                if changed == 0 {
                    return Err(tokio_rusqlite::Error::Other(Box::new(
                        RepositoryError::project_not_found(current),
                    )));
                }

                conn.query_row(&schema::select_project_by_slug(), [&p.slug], row_to_project)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_slug(e, &project.slug))
    }

    async fn delete_project(&self, slug: &str) -> Result<()> {
        let slug_owned = slug.to_string();

        let deleted = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_PROJECT, [&slug_owned])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_slug(e, slug))?;

        if deleted == 0 {
            return Err(RepositoryError::project_not_found(slug));
        }
        Ok(())
    }

    async fn image_ref_in_use(&self, reference: &str) -> Result<bool> {
        let reference = reference.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_IMAGE_REF_IN_USE, [&reference], |row| {
                    row.get::<_, bool>(0)
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete_all_projects(&self) -> Result<usize> {
        self.conn
            .call(|conn| {
                conn.execute(schema::DELETE_ALL_PROJECTS, [])
                    .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn ping(&self) -> Result<()> {
        let table_exists = self
            .conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                conn.query_row(schema::SELECT_PROJECTS_TABLE_EXISTS, [], |row| {
                    row.get::<_, bool>(0)
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        if table_exists {
            Ok(())
        } else {
            Err(RepositoryError::QueryFailed(
                "projects table does not exist".to_string(),
            ))
        }
    }
}
