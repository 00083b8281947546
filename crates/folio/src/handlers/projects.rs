//! Project CRUD handlers.
//!
//! The `*_impl` functions hold the create/update/delete rules and are shared
//! with the dashboard form handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use folio_auth::AdminSession;
use folio_core::images::{is_image_content_type, removed_refs, ImageUpload};
use folio_core::project::Project;
use serde_json::json;

use super::{error::ApiError, form::ProjectForm};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .projects
        .list_projects()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch projects", e))?;

    Ok(Json(projects))
}

/// GET /api/projects/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, ApiError> {
    state
        .projects
        .get_project_by_slug(&slug)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch project", e))?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/projects
pub async fn create_project(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    form: ProjectForm,
) -> Result<impl IntoResponse, ApiError> {
    let project = create_project_impl(&state, form).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{slug}
pub async fn update_project(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    form: ProjectForm,
) -> Result<Json<Project>, ApiError> {
    update_project_impl(&state, &slug, form).await.map(Json)
}

/// DELETE /api/projects/{slug}
pub async fn delete_project(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    delete_project_impl(&state, &slug).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

pub(crate) async fn create_project_impl(
    state: &AppState,
    form: ProjectForm,
) -> Result<Project, ApiError> {
    let ProjectForm {
        fields,
        image,
        screenshot_files,
    } = form;

    fields.check_required(image.is_some())?;
    check_main_image(image.as_ref())?;

    if let Some(slug) = fields.requested_slug() {
        if slug_taken(state, slug).await? {
            return Err(ApiError::slug_taken());
        }
    }

    let stored = StoredUploads::store(state, image, screenshot_files).await?;
    let new_project = match fields.into_new_project(stored.main.clone(), stored.screenshots.clone())
    {
        Ok(project) => project,
        Err(e) => {
            stored.discard(state).await;
            return Err(e.into());
        }
    };

    match state.projects.create_project(&new_project).await {
        Ok(project) => {
            tracing::info!(slug = %project.slug, id = project.id, "project created");
            Ok(project)
        }
        Err(e) => {
            stored.discard(state).await;
            Err(ApiError::from_repository(e, "Failed to create project"))
        }
    }
}

pub(crate) async fn update_project_impl(
    state: &AppState,
    slug: &str,
    form: ProjectForm,
) -> Result<Project, ApiError> {
    let ProjectForm {
        fields,
        image,
        screenshot_files,
    } = form;

    let current = state
        .projects
        .get_project_by_slug(slug)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch project", e))?
        .ok_or_else(ApiError::not_found)?;

    check_main_image(image.as_ref())?;

    if let Some(requested) = fields.requested_slug() {
        if requested != current.slug && slug_taken(state, requested).await? {
            return Err(ApiError::slug_taken());
        }
    }

    let stored = StoredUploads::store(state, image, screenshot_files).await?;
    let mut updated = current.clone();
    if let Err(e) = fields.apply_to(
        &mut updated,
        stored.main.clone(),
        stored.screenshots.clone(),
        Utc::now(),
    ) {
        stored.discard(state).await;
        return Err(e.into());
    }

    let saved = match state.projects.update_project(slug, &updated).await {
        Ok(project) => project,
        Err(e) => {
            stored.discard(state).await;
            return Err(ApiError::from_repository(e, "Failed to update project"));
        }
    };

    let orphaned: Vec<String> = {
        let kept: Vec<&str> = saved.image_refs().collect();
        removed_refs(current.image_refs(), &kept)
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    state.discard_images(orphaned).await;

    tracing::info!(slug = %saved.slug, previous_slug = %slug, "project updated");
    Ok(saved)
}

pub(crate) async fn delete_project_impl(state: &AppState, slug: &str) -> Result<(), ApiError> {
    let project = state
        .projects
        .get_project_by_slug(slug)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch project", e))?
        .ok_or_else(ApiError::not_found)?;

    state
        .projects
        .delete_project(slug)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete project"))?;

    state
        .discard_images(project.image_refs().map(str::to_string).collect())
        .await;
    tracing::info!(slug = %slug, "project deleted");
    Ok(())
}

fn check_main_image(image: Option<&ImageUpload>) -> Result<(), ApiError> {
    match image {
        Some(upload) if !is_image_content_type(&upload.content_type) => Err(
            ApiError::bad_request("Only image files are allowed for main image"),
        ),
        _ => Ok(()),
    }
}

async fn slug_taken(state: &AppState, slug: &str) -> Result<bool, ApiError> {
    state
        .projects
        .slug_exists(slug)
        .await
        .map_err(|e| ApiError::internal("Failed to check slug", e))
}

/// References produced by storing a request's uploads.
#[derive(Debug, Default)]
struct StoredUploads {
    main: Option<String>,
    screenshots: Vec<String>,
}

impl StoredUploads {
    /// Stores every upload. On failure, whatever was already stored is
    /// discarded before the error is returned.
    async fn store(
        state: &AppState,
        image: Option<ImageUpload>,
        screenshot_files: Vec<ImageUpload>,
    ) -> Result<Self, ApiError> {
        let mut stored = Self::default();

        if let Some(upload) = image {
            stored.main = Some(stored.keep(state, state.images.store(upload).await).await?);
        }
        for upload in screenshot_files {
            let reference = stored.keep(state, state.images.store(upload).await).await?;
            stored.screenshots.push(reference);
        }

        Ok(stored)
    }

    async fn keep(
        &self,
        state: &AppState,
        result: folio_core::images::Result<String>,
    ) -> Result<String, ApiError> {
        match result {
            Ok(reference) => Ok(reference),
            Err(e) => {
                self.discard(state).await;
                Err(e.into())
            }
        }
    }

    async fn discard(&self, state: &AppState) {
        let refs = self.main.iter().chain(&self.screenshots).cloned().collect();
        state.discard_images(refs).await;
    }
}
