//! Request body extraction for project submissions.
//!
//! Create and update accept the same payload in three encodings:
//! `multipart/form-data` (text fields plus `image` / `screenshot_files`
//! file parts), `application/x-www-form-urlencoded` and `application/json`.

use axum::{
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use folio_core::images::ImageUpload;
use folio_core::project::ProjectFields;
use serde_json::{Map, Value};

use super::error::ApiError;

/// A parsed project submission.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub fields: ProjectFields,
    /// Main image file, if one was uploaded.
    pub image: Option<ImageUpload>,
    pub screenshot_files: Vec<ImageUpload>,
}

impl<S> FromRequest<S> for ProjectForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            let parts = MultipartParts::collect(multipart).await?;
            return parts.into_project_form();
        }

        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<ProjectFields>::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            return Ok(Self {
                fields,
                ..Default::default()
            });
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        Ok(Self {
            fields: fields_from_pairs(pairs)?,
            ..Default::default()
        })
    }
}

/// Text fields and file parts of a multipart body, in submission order.
#[derive(Debug, Default)]
pub struct MultipartParts {
    pub text: Vec<(String, String)>,
    pub files: Vec<(String, ImageUpload)>,
}

impl MultipartParts {
    /// Reads every part. File inputs left empty by the browser are skipped.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut parts = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                if let Some(upload) = read_file(field).await? {
                    parts.files.push((name, upload));
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                parts.text.push((name, text));
            }
        }

        Ok(parts)
    }

    /// Removes and returns the first file part named `name`.
    pub fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        let idx = self.files.iter().position(|(n, _)| n == name)?;
        Some(self.files.remove(idx).1)
    }

    fn into_project_form(mut self) -> Result<ProjectForm, ApiError> {
        let image = self.take_file("image");
        let screenshot_files = self
            .files
            .into_iter()
            .filter(|(name, _)| name == "screenshot_files" || name == "screenshot_files[]")
            .map(|(_, upload)| upload)
            .collect();

        Ok(ProjectForm {
            fields: fields_from_pairs(self.text)?,
            image,
            screenshot_files,
        })
    }
}

async fn read_file(field: Field<'_>) -> Result<Option<ImageUpload>, ApiError> {
    let filename = field
        .file_name()
        .map(str::to_string)
        .filter(|f| !f.is_empty());
    let content_type = field
        .content_type()
        .map(str::to_string)
        .or_else(|| {
            filename
                .as_deref()
                .and_then(|f| mime_guess::from_path(f).first_raw())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?;

    if filename.is_none() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageUpload::new(filename, content_type, bytes.to_vec())))
}

/// Builds [`ProjectFields`] from form pairs.
///
/// A repeated `screenshots` key is collected into a list; other repeated
/// keys keep their last value.
fn fields_from_pairs(pairs: Vec<(String, String)>) -> Result<ProjectFields, ApiError> {
    let mut map = Map::new();

    for (key, value) in pairs {
        let key = key.trim_end_matches("[]").to_string();
        match map.get_mut(&key) {
            Some(Value::Array(items)) if key == "screenshots" => items.push(Value::String(value)),
            Some(existing) if key == "screenshots" => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            _ => {
                map.insert(key, Value::String(value));
            }
        }
    }

    serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::bad_request(format!("Invalid form data: {e}")))
}
