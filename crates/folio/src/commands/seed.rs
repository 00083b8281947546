use anyhow::{Context, Result};
use folio_core::project::sample_projects;
use folio_core::storage::ProjectRepository;

/// What a seed run changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub deleted: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Loads the sample projects.
///
/// Existing projects are deleted first unless `keep` is set; with `keep`,
/// samples whose slug is already taken are skipped.
pub async fn run(repo: &dyn ProjectRepository, keep: bool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if !keep {
        report.deleted = repo
            .delete_all_projects()
            .await
            .context("Failed to clear existing projects")?;
        tracing::info!(deleted = report.deleted, "cleared existing projects");
    }

    for project in sample_projects() {
        if repo.slug_exists(&project.slug).await? {
            tracing::info!(slug = %project.slug, "sample project already present, skipping");
            report.skipped += 1;
            continue;
        }

        let created = repo
            .create_project(&project)
            .await
            .with_context(|| format!("Failed to insert sample project '{}'", project.slug))?;
        tracing::info!(slug = %created.slug, id = created.id, "inserted sample project");
        report.inserted += 1;
    }

    Ok(report)
}
