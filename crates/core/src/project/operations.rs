use url::Url;

use super::error::ProjectError;
use super::types::{NewProject, Project};

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Validates a project slug: 1..=100 characters of `[A-Za-z0-9_-]`.
pub fn validate_slug(slug: &str) -> Result<(), ProjectError> {
    if slug.is_empty() {
        return Err(ProjectError::MissingRequiredFields);
    }
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(ProjectError::SlugTooLong);
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ProjectError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Validates an optional link field. Only absolute http(s) URLs are accepted.
pub fn validate_url(field: &'static str, value: Option<&str>) -> Result<(), ProjectError> {
    let Some(value) = value else {
        return Ok(());
    };

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(ProjectError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn validate_fields(
    slug: &str,
    title: &str,
    short_description: &str,
    image_url: &str,
    live_demo_url: Option<&str>,
    github_repo_url: Option<&str>,
) -> Result<(), ProjectError> {
    if title.trim().is_empty() || short_description.trim().is_empty() {
        return Err(ProjectError::MissingRequiredFields);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ProjectError::TitleTooLong);
    }
    validate_slug(slug)?;
    if image_url.trim().is_empty() {
        return Err(ProjectError::MissingImage);
    }
    validate_url("live_demo_url", live_demo_url)?;
    validate_url("github_repo_url", github_repo_url)?;
    Ok(())
}

/// Validates a project before it is inserted.
pub fn validate_new_project(project: &NewProject) -> Result<(), ProjectError> {
    validate_fields(
        &project.slug,
        &project.title,
        &project.short_description,
        &project.image_url,
        project.live_demo_url.as_deref(),
        project.github_repo_url.as_deref(),
    )
}

/// Validates a project before it is updated.
pub fn validate_project(project: &Project) -> Result<(), ProjectError> {
    validate_fields(
        &project.slug,
        &project.title,
        &project.short_description,
        &project.image_url,
        project.live_demo_url.as_deref(),
        project.github_repo_url.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project() -> NewProject {
        NewProject {
            slug: "my-project_2".to_string(),
            title: "My Project".to_string(),
            short_description: "Short".to_string(),
            image_url: "https://example.com/a.png".to_string(),
            description: None,
            live_demo_url: Some("http://demo.example.com/path".to_string()),
            github_repo_url: None,
            screenshots: vec![],
        }
    }

    #[test]
    fn test_validate_slug_accepts_allowed_characters() {
        assert!(validate_slug("abc-DEF_123").is_ok());
    }

    #[test]
    fn test_validate_slug_rejects_spaces_and_punctuation() {
        assert_eq!(
            validate_slug("bad slug"),
            Err(ProjectError::InvalidSlug("bad slug".to_string()))
        );
        assert!(validate_slug("../etc").is_err());
    }

    #[test]
    fn test_validate_slug_length_boundary() {
        assert!(validate_slug(&"a".repeat(100)).is_ok());
        assert_eq!(
            validate_slug(&"a".repeat(101)),
            Err(ProjectError::SlugTooLong)
        );
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("live_demo_url", None).is_ok());
        assert!(validate_url("live_demo_url", Some("https://x.dev")).is_ok());
        assert!(validate_url("live_demo_url", Some("ftp://x.dev")).is_err());
        assert!(validate_url("github_repo_url", Some("github.com/u/r")).is_err());
    }

    #[test]
    fn test_validate_new_project_valid() {
        assert!(validate_new_project(&new_project()).is_ok());
    }

    #[test]
    fn test_validate_new_project_title_too_long() {
        let project = NewProject {
            title: "x".repeat(201),
            ..new_project()
        };
        assert_eq!(
            validate_new_project(&project),
            Err(ProjectError::TitleTooLong)
        );
    }

    #[test]
    fn test_validate_new_project_bad_repo_url() {
        let project = NewProject {
            github_repo_url: Some("javascript:alert(1)".to_string()),
            ..new_project()
        };
        assert!(matches!(
            validate_new_project(&project),
            Err(ProjectError::InvalidUrl {
                field: "github_repo_url",
                ..
            })
        ));
    }
}
