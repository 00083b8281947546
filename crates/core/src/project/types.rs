use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portfolio project as stored and served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub short_description: String,
    /// Main image reference: external URL, `data:` URL, or `/uploads/` path.
    pub image_url: String,
    pub description: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_repo_url: Option<String>,
    pub screenshots: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Returns every image reference owned by this project, main image first.
    pub fn image_refs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image_url.as_str()).chain(self.screenshots.iter().map(String::as_str))
    }
}

/// A validated project that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub image_url: String,
    pub description: Option<String>,
    pub live_demo_url: Option<String>,
    pub github_repo_url: Option<String>,
    pub screenshots: Vec<String>,
}

impl NewProject {
    /// Materializes the record the way storage will return it.
    pub fn into_project(self, id: i64, now: DateTime<Utc>) -> Project {
        Project {
            id,
            slug: self.slug,
            title: self.title,
            short_description: self.short_description,
            image_url: self.image_url,
            description: self.description,
            live_demo_url: self.live_demo_url,
            github_repo_url: self.github_repo_url,
            screenshots: self.screenshots,
            created_at: now,
            updated_at: now,
        }
    }
}
