mod error;
mod operations;
mod requests;
mod sample_data;
mod types;

pub use error::ProjectError;
pub use operations::{
    validate_new_project, validate_project, validate_slug, validate_url, MAX_SLUG_LEN,
    MAX_TITLE_LEN,
};
pub use requests::ProjectFields;
pub use sample_data::sample_projects;
pub use types::{NewProject, Project};
