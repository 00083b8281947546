use anyhow::{bail, Result};

use crate::storage::{diagnose, hint_for, DbStatus};

/// Checks that the database at `path` is reachable and reports what it holds.
///
/// Returns an error (and so a non-zero exit code) when the database cannot
/// be queried.
pub async fn run(path: &str) -> Result<DbStatus> {
    println!("Checking database at {path}");

    let status = match diagnose(path).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, path, "database check failed");
            println!("  connection: FAILED ({e})");
            println!("  hint: {}", hint_for(&e));
            bail!("database check failed: {e}");
        }
    };

    println!("  connection: ok");
    match status.project_count {
        Some(count) => println!("  projects table: present ({count} rows)"),
        None => {
            println!("  projects table: missing");
            println!("  hint: start the server once or run `folio seed` to create it");
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteRepository;

    #[tokio::test]
    async fn reports_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");
        let path = path.to_str().unwrap();
        SqliteRepository::new(path).await.unwrap();

        let status = run(path).await.unwrap();

        assert!(status.projects_table);
        assert_eq!(status.project_count, Some(0));
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");

        assert!(run(path.to_str().unwrap()).await.is_err());
        assert!(!path.exists());
    }
}
