//! askama page templates and the view models they render.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use folio_core::project::{Project, ProjectFields};

use super::flash::FlashMessage;

/// Template wrapper that converts askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<FlashMessage>,
    pub return_to: String,
}

#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectsTemplate {
    pub flash: Option<FlashMessage>,
    pub rows: Vec<ProjectRow>,
}

/// Screenshots shown inline in the list before collapsing into a badge.
const LIST_SCREENSHOTS: usize = 3;

/// One line of the project table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub title: String,
    pub slug: String,
    pub thumbnail: String,
    pub screenshots: Vec<String>,
    pub more_screenshots: usize,
    pub created: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            slug: project.slug.clone(),
            thumbnail: project.image_url.clone(),
            screenshots: project
                .screenshots
                .iter()
                .take(LIST_SCREENSHOTS)
                .cloned()
                .collect(),
            more_screenshots: project.screenshots.len().saturating_sub(LIST_SCREENSHOTS),
            created: format_created(project),
        }
    }
}

fn format_created(project: &Project) -> String {
    // Records imported with a zero timestamp have no meaningful date.
    if project.created_at.timestamp() <= 0 {
        return "N/A".to_string();
    }
    project.created_at.format("%Y-%m-%d").to_string()
}

#[derive(Template)]
#[template(path = "project_form.html")]
pub struct ProjectFormTemplate {
    pub flash: Option<FlashMessage>,
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub error: Option<String>,
    pub values: FormValues,
    pub current_image: Option<String>,
    pub current_screenshots: Vec<String>,
}

impl ProjectFormTemplate {
    pub fn new_project(values: FormValues, error: Option<String>) -> Self {
        Self {
            flash: None,
            heading: "New project".to_string(),
            action: "/dashboard/projects/new".to_string(),
            submit_label: "Create project".to_string(),
            error,
            values,
            current_image: None,
            current_screenshots: Vec::new(),
        }
    }

    pub fn edit_project(project: &Project, values: FormValues, error: Option<String>) -> Self {
        Self {
            flash: None,
            heading: format!("Edit {}", project.title),
            action: format!("/dashboard/projects/{}/edit", project.slug),
            submit_label: "Save changes".to_string(),
            error,
            values,
            current_image: Some(project.image_url.clone()),
            current_screenshots: project.screenshots.clone(),
        }
    }
}

/// Text values shown in the project form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub live_demo_url: String,
    pub github_repo_url: String,
    pub image_url: String,
    /// One URL per line.
    pub screenshots: String,
}

impl From<&Project> for FormValues {
    /// Pre-fills the edit form. The image URL input stays empty so an
    /// untouched form keeps the current image.
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            slug: project.slug.clone(),
            short_description: project.short_description.clone(),
            description: project.description.clone().unwrap_or_default(),
            live_demo_url: project.live_demo_url.clone().unwrap_or_default(),
            github_repo_url: project.github_repo_url.clone().unwrap_or_default(),
            image_url: String::new(),
            screenshots: project.screenshots.join("\n"),
        }
    }
}

impl From<&ProjectFields> for FormValues {
    /// Echoes a rejected submission back into the form.
    fn from(fields: &ProjectFields) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            title: text(&fields.title),
            slug: text(&fields.slug),
            short_description: text(&fields.short_description),
            description: text(&fields.description),
            live_demo_url: text(&fields.live_demo_url),
            github_repo_url: text(&fields.github_repo_url),
            image_url: text(&fields.image_url),
            screenshots: fields
                .screenshots
                .as_ref()
                .map(|s| s.join("\n"))
                .unwrap_or_default(),
        }
    }
}
