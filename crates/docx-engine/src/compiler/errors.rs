//! Error types for report compilation

use thiserror::Error;

/// Errors raised while turning a report into a document
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid report content: {0}")]
    Content(String),

    #[error("Invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Packaging error: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    #[error("Generation task failed: {0}")]
    Task(String),
}

impl EngineError {
    /// True for errors caused by the report itself rather than the engine
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            EngineError::Content(_) | EngineError::Json(_) | EngineError::DataSource(_)
        )
    }
}
