//! Server-rendered admin dashboard.
//!
//! Every route here sits behind the dashboard gate, so handlers can assume
//! an authenticated admin.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::{
    error::AppError,
    flash::{redirect_with_flash, take_flash, FlashMessage},
    form::ProjectForm,
    pages::{FormValues, HtmlTemplate, ProjectFormTemplate, ProjectRow, ProjectsTemplate},
    projects::{create_project_impl, delete_project_impl, update_project_impl},
};
use crate::state::AppState;

const LIST_URL: &str = "/dashboard/projects";

/// GET /dashboard/projects
pub async fn projects_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let projects = state.projects.list_projects().await?;
    let (jar, flash) = take_flash(jar);

    let template = ProjectsTemplate {
        flash,
        rows: projects.iter().map(ProjectRow::from).collect(),
    };
    Ok((jar, HtmlTemplate(template)))
}

/// GET /dashboard/projects/new
pub async fn new_project_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = take_flash(jar);
    let mut template = ProjectFormTemplate::new_project(FormValues::default(), None);
    template.flash = flash;
    (jar, HtmlTemplate(template))
}

/// POST /dashboard/projects/new
pub async fn create_project_submit(State(state): State<AppState>, form: ProjectForm) -> Response {
    let submitted = FormValues::from(&form.fields);

    match create_project_impl(&state, form).await {
        Ok(_) => redirect_with_flash(LIST_URL, FlashMessage::success("Project created successfully")),
        Err(e) => (
            e.status,
            HtmlTemplate(ProjectFormTemplate::new_project(submitted, Some(e.message))),
        )
            .into_response(),
    }
}

/// GET /dashboard/projects/{slug}/edit
pub async fn edit_project_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let Some(project) = state.projects.get_project_by_slug(&slug).await? else {
        return Ok(redirect_with_flash(LIST_URL, FlashMessage::error("Project not found")));
    };

    let (jar, flash) = take_flash(jar);
    let mut template = ProjectFormTemplate::edit_project(&project, FormValues::from(&project), None);
    template.flash = flash;
    Ok((jar, HtmlTemplate(template)).into_response())
}

/// POST /dashboard/projects/{slug}/edit
pub async fn edit_project_submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    form: ProjectForm,
) -> Result<Response, AppError> {
    let submitted = FormValues::from(&form.fields);

    let error = match update_project_impl(&state, &slug, form).await {
        Ok(_) => {
            return Ok(redirect_with_flash(
                LIST_URL,
                FlashMessage::success("Project updated successfully"),
            ))
        }
        Err(e) => e,
    };

    // Re-render against the stored record so the previews stay accurate.
    let Some(project) = state.projects.get_project_by_slug(&slug).await? else {
        return Ok(redirect_with_flash(LIST_URL, FlashMessage::error(error.message)));
    };
    let template = ProjectFormTemplate::edit_project(&project, submitted, Some(error.message));
    Ok((error.status, HtmlTemplate(template)).into_response())
}

/// POST /dashboard/projects/{slug}/delete
pub async fn delete_project_submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let flash = match delete_project_impl(&state, &slug).await {
        Ok(()) => FlashMessage::success("Project deleted successfully"),
        Err(e) => FlashMessage::error(e.message),
    };
    redirect_with_flash(LIST_URL, flash)
}
