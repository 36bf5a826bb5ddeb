//! dem-project: pipeline file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_pipeline};

/// Newest pipeline file version this crate reads.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load, validate and resolve a pipeline file.
///
/// Relative paths inside the file are resolved against its directory.
pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Pipeline> {
    let content = std::fs::read_to_string(path)?;
    let pipeline: Pipeline = serde_yaml::from_str(&content)?;
    validate_pipeline(&pipeline)?;
    let base = path.parent().unwrap_or_else(|| std::path::Path::new("."));
    Ok(pipeline.resolved(base))
}

pub fn save_yaml(path: &std::path::Path, pipeline: &Pipeline) -> ProjectResult<()> {
    validate_pipeline(pipeline)?;
    let content = serde_yaml::to_string(pipeline)?;
    std::fs::write(path, content)?;
    Ok(())
}
