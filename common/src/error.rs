use config::ConfigError;
use thiserror::Error;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequestShape(String),
    #[error("Retrieval service error: {0}")]
    UpstreamRetrieval(String),
    #[error("Completion service error: {0}")]
    UpstreamCompletion(String),
    #[error("Completion is not valid JSON: {0}")]
    MalformedCompletion(String),
    #[error("Completion has an invalid shape: {0}")]
    InvalidResponseShape(String),
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),
    #[error("News feed error: {0}")]
    NewsFeed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl AppError {
    /// True for failures caused by the caller rather than by this service or its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidRequestShape(_))
    }
}
