//! gb-project: boundary-condition definition files and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_definition};

/// Newest definition file version this crate reads and writes.
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

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<BcFile> {
    let content = std::fs::read_to_string(path)?;
    let file: BcFile = serde_yaml::from_str(&content)?;
    validate_definition(&file)?;
    Ok(file)
}

pub fn save_yaml(path: &std::path::Path, file: &BcFile) -> ProjectResult<()> {
    validate_definition(file)?;
    let content = serde_yaml::to_string(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<BcFile> {
    let content = std::fs::read_to_string(path)?;
    let file: BcFile = serde_json::from_str(&content)?;
    validate_definition(&file)?;
    Ok(file)
}

pub fn save_json(path: &std::path::Path, file: &BcFile) -> ProjectResult<()> {
    validate_definition(file)?;
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a definition, choosing the format from the file extension
/// (`.json` is JSON, anything else YAML).
pub fn load(path: &std::path::Path) -> ProjectResult<BcFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
