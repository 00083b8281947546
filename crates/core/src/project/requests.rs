//! Project submission payloads.
//!
//! A submission carries the text fields of a create or update request. Image
//! uploads are resolved to references by the caller before the submission is
//! turned into a [`NewProject`] or applied to an existing [`Project`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ProjectError;
use super::operations::{validate_new_project, validate_project};
use super::types::{NewProject, Project};
use crate::serde::{deserialize_optional_string, deserialize_optional_string_list};

/// Text fields of a project create/update request.
///
/// Every field is optional so the same payload serves both creation (where
/// the required fields are checked) and partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub short_description: Option<String>,
    /// Present-but-empty clears the description on update.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub live_demo_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub github_repo_url: Option<String>,
    #[serde(
        default,
        alias = "image_base64",
        deserialize_with = "deserialize_optional_string"
    )]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string_list")]
    pub screenshots: Option<Vec<String>>,
}

impl ProjectFields {
    /// Checks the fields a new project cannot do without.
    ///
    /// `has_image_upload` is true when the request carries a main image file,
    /// which stands in for `image_url`.
    pub fn check_required(&self, has_image_upload: bool) -> Result<(), ProjectError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        if !(present(&self.title) && present(&self.slug) && present(&self.short_description)) {
            return Err(ProjectError::MissingRequiredFields);
        }
        if !has_image_upload && !present(&self.image_url) {
            return Err(ProjectError::MissingImage);
        }
        Ok(())
    }

    /// Builds a new project from the submission.
    ///
    /// `uploaded_image` takes precedence over `image_url` when both are set.
    /// `extra_screenshots` are appended after the submitted list.
    pub fn into_new_project(
        self,
        uploaded_image: Option<String>,
        extra_screenshots: Vec<String>,
    ) -> Result<NewProject, ProjectError> {
        let (Some(title), Some(slug), Some(short_description)) = (
            trimmed(self.title),
            trimmed(self.slug),
            trimmed(self.short_description),
        ) else {
            return Err(ProjectError::MissingRequiredFields);
        };

        let image_url = uploaded_image
            .or_else(|| trimmed(self.image_url))
            .ok_or(ProjectError::MissingImage)?;

        let mut screenshots = clean_list(self.screenshots.unwrap_or_default());
        screenshots.extend(extra_screenshots);

        let project = NewProject {
            slug,
            title,
            short_description,
            image_url,
            description: trimmed(self.description),
            live_demo_url: trimmed(self.live_demo_url),
            github_repo_url: trimmed(self.github_repo_url),
            screenshots,
        };

        validate_new_project(&project)?;
        Ok(project)
    }

    /// Applies a partial update to an existing project.
    ///
    /// Absent or empty scalar fields keep their current value, except
    /// `description`, which is replaced whenever it is present.
    pub fn apply_to(
        self,
        project: &mut Project,
        uploaded_image: Option<String>,
        extra_screenshots: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectError> {
        let mut updated = project.clone();

        if let Some(title) = trimmed(self.title) {
            updated.title = title;
        }
        if let Some(slug) = trimmed(self.slug) {
            updated.slug = slug;
        }
        if let Some(short_description) = trimmed(self.short_description) {
            updated.short_description = short_description;
        }
        if let Some(description) = self.description {
            updated.description = trimmed(Some(description));
        }
        if let Some(url) = trimmed(self.live_demo_url) {
            updated.live_demo_url = Some(url);
        }
        if let Some(url) = trimmed(self.github_repo_url) {
            updated.github_repo_url = Some(url);
        }
        if let Some(image_url) = uploaded_image.or_else(|| trimmed(self.image_url)) {
            updated.image_url = image_url;
        }
        if let Some(screenshots) = self.screenshots {
            updated.screenshots = clean_list(screenshots);
        }
        updated.screenshots.extend(extra_screenshots);
        updated.updated_at = now;

        validate_project(&updated)?;
        *project = updated;
        Ok(())
    }

    /// Returns the slug this submission asks for, if any.
    pub fn requested_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| trimmed(Some(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_fields() -> ProjectFields {
        ProjectFields {
            title: Some("Folio".to_string()),
            slug: Some("folio".to_string()),
            short_description: Some("Portfolio CMS".to_string()),
            description: Some("".to_string()),
            live_demo_url: Some("https://folio.example.com".to_string()),
            github_repo_url: None,
            image_url: Some("https://example.com/main.png".to_string()),
            screenshots: Some(vec!["https://example.com/1.png".to_string(), " ".to_string()]),
        }
    }

    fn existing() -> Project {
        NewProject {
            slug: "old".to_string(),
            title: "Old".to_string(),
            short_description: "Old short".to_string(),
            image_url: "https://example.com/old.png".to_string(),
            description: Some("Old long".to_string()),
            live_demo_url: Some("https://old.example.com".to_string()),
            github_repo_url: Some("https://github.com/u/old".to_string()),
            screenshots: vec!["https://example.com/s1.png".to_string()],
        }
        .into_project(1, Utc::now())
    }

    #[test]
    fn into_new_project_requires_title_slug_and_short_description() {
        let fields = ProjectFields {
            slug: None,
            ..full_fields()
        };

        let result = fields.into_new_project(None, Vec::new());

        assert_eq!(result, Err(ProjectError::MissingRequiredFields));
    }

    #[test]
    fn into_new_project_requires_an_image() {
        let fields = ProjectFields {
            image_url: None,
            ..full_fields()
        };

        let result = fields.into_new_project(None, Vec::new());

        assert_eq!(result, Err(ProjectError::MissingImage));
    }

    #[test]
    fn check_required_accepts_upload_in_place_of_image_url() {
        let fields = ProjectFields {
            image_url: None,
            ..full_fields()
        };

        assert_eq!(fields.check_required(false), Err(ProjectError::MissingImage));
        assert_eq!(fields.check_required(true), Ok(()));

        let fields = ProjectFields {
            title: Some("  ".to_string()),
            ..full_fields()
        };
        assert_eq!(
            fields.check_required(true),
            Err(ProjectError::MissingRequiredFields)
        );
    }

    #[test]
    fn into_new_project_prefers_uploaded_image() {
        let project = full_fields()
            .into_new_project(Some("data:image/png;base64,AA==".to_string()), Vec::new())
            .unwrap();

        assert_eq!(project.image_url, "data:image/png;base64,AA==");
    }

    #[test]
    fn into_new_project_normalizes_optional_fields() {
        let project = full_fields()
            .into_new_project(None, vec!["/uploads/extra.png".to_string()])
            .unwrap();

        assert_eq!(project.description, None);
        assert_eq!(project.github_repo_url, None);
        assert_eq!(
            project.screenshots,
            vec![
                "https://example.com/1.png".to_string(),
                "/uploads/extra.png".to_string()
            ]
        );
    }

    #[test]
    fn apply_to_keeps_fields_that_are_absent_or_empty() {
        let mut project = existing();
        let fields = ProjectFields {
            title: Some("New".to_string()),
            ..Default::default()
        };

        fields
            .apply_to(&mut project, None, Vec::new(), Utc::now())
            .unwrap();

        assert_eq!(project.title, "New");
        assert_eq!(project.slug, "old");
        assert_eq!(project.description, Some("Old long".to_string()));
        assert_eq!(project.screenshots.len(), 1);
    }

    #[test]
    fn apply_to_clears_description_when_present_and_empty() {
        let mut project = existing();
        let fields = ProjectFields {
            description: Some(String::new()),
            ..Default::default()
        };

        fields
            .apply_to(&mut project, None, Vec::new(), Utc::now())
            .unwrap();

        assert_eq!(project.description, None);
    }

    #[test]
    fn apply_to_replaces_screenshots_and_appends_uploads() {
        let mut project = existing();
        let fields = ProjectFields {
            screenshots: Some(vec![]),
            ..Default::default()
        };

        fields
            .apply_to(
                &mut project,
                None,
                vec!["/uploads/new.png".to_string()],
                Utc::now(),
            )
            .unwrap();

        assert_eq!(project.screenshots, vec!["/uploads/new.png".to_string()]);
    }

    #[test]
    fn apply_to_refreshes_updated_at() {
        let mut project = existing();
        let later = project.updated_at + chrono::Duration::minutes(5);

        ProjectFields::default()
            .apply_to(&mut project, None, Vec::new(), later)
            .unwrap();

        assert_eq!(project.updated_at, later);
    }

    #[test]
    fn apply_to_leaves_project_untouched_on_validation_error() {
        let mut project = existing();
        let fields = ProjectFields {
            title: Some("Renamed".to_string()),
            live_demo_url: Some("not a url".to_string()),
            ..Default::default()
        };

        let result = fields.apply_to(&mut project, None, Vec::new(), Utc::now());

        assert!(matches!(result, Err(ProjectError::InvalidUrl { .. })));
        assert_eq!(project.title, "Old");
    }

    #[test]
    fn requested_slug_ignores_blank_values() {
        let fields = ProjectFields {
            slug: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(fields.requested_slug(), None);
    }

    #[test]
    fn deserializes_image_base64_alias_and_string_screenshots() {
        let json = r#"{
            "title": "T",
            "image_base64": "data:image/png;base64,AA==",
            "screenshots": "[\"https://example.com/1.png\"]"
        }"#;

        let fields: ProjectFields = serde_json::from_str(json).unwrap();

        assert_eq!(
            fields.image_url.as_deref(),
            Some("data:image/png;base64,AA==")
        );
        assert_eq!(
            fields.screenshots,
            Some(vec!["https://example.com/1.png".to_string()])
        );
    }
}
