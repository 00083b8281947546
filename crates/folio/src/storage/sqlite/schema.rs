//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create the projects table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL,
    title TEXT NOT NULL,
    short_description TEXT NOT NULL,
    image_url TEXT NOT NULL,
    description TEXT,
    live_demo_url TEXT,
    github_repo_url TEXT,
    screenshots TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_slug ON projects(slug);
CREATE INDEX IF NOT EXISTS idx_projects_created_at ON projects(created_at);
"#;

const PROJECT_COLUMNS: &str = "id, slug, title, short_description, image_url, description, \
     live_demo_url, github_repo_url, screenshots, created_at, updated_at";

pub const INSERT_PROJECT: &str = r#"
INSERT INTO projects (slug, title, short_description, image_url, description,
                      live_demo_url, github_repo_url, screenshots, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub fn select_all_projects() -> String {
    format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC")
}

pub fn select_project_by_slug() -> String {
    format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = ?1")
}

pub fn select_project_by_id() -> String {
    format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1")
}

pub const SELECT_SLUG_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM projects WHERE slug = ?1)
"#;

pub const SELECT_IMAGE_REF_IN_USE: &str = r#"
SELECT EXISTS(
    SELECT 1 FROM projects
    WHERE image_url = ?1
       OR EXISTS(SELECT 1 FROM json_each(projects.screenshots) WHERE value = ?1)
)
"#;

pub const UPDATE_PROJECT: &str = r#"
UPDATE projects
SET slug = ?2, title = ?3, short_description = ?4, image_url = ?5, description = ?6,
    live_demo_url = ?7, github_repo_url = ?8, screenshots = ?9, updated_at = ?10
WHERE slug = ?1
"#;

pub const DELETE_PROJECT: &str = r#"
DELETE FROM projects
WHERE slug = ?1
"#;

pub const DELETE_ALL_PROJECTS: &str = "DELETE FROM projects";

pub const PING: &str = "SELECT 1";

pub const SELECT_PROJECTS_TABLE_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'projects')
"#;

pub const COUNT_PROJECTS: &str = "SELECT COUNT(*) FROM projects";
