use async_trait::async_trait;

use crate::project::{NewProject, Project};

use super::Result;

/// Repository for portfolio project operations.
///
/// Projects are addressed by slug; the numeric id is storage-assigned and
/// only surfaces in responses.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists all projects, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Gets a project by its slug.
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>>;

    /// Returns true when a project with this slug exists.
    async fn slug_exists(&self, slug: &str) -> Result<bool>;

    /// Inserts a project and returns the stored record.
    ///
    /// Fails with `AlreadyExists` when the slug is taken.
    async fn create_project(&self, project: &NewProject) -> Result<Project>;

    /// Replaces the project currently stored under `current_slug`.
    ///
    /// `project.slug` may differ from `current_slug` to rename it. Fails with
    /// `NotFound` if nothing is stored under `current_slug` and with
    /// `AlreadyExists` if the new slug collides with another project.
    async fn update_project(&self, current_slug: &str, project: &Project) -> Result<Project>;

    /// Deletes a project by slug. Fails with `NotFound` if it does not exist.
    async fn delete_project(&self, slug: &str) -> Result<()>;

    /// Returns true when any stored project uses `reference` as its main
    /// image or as a screenshot.
    async fn image_ref_in_use(&self, reference: &str) -> Result<bool>;

    /// Deletes every project and returns how many were removed.
    async fn delete_all_projects(&self) -> Result<usize>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
