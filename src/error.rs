use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("model file not found at `{0}`")]
    ModelNotFound(PathBuf),

    #[error("invalid model: {}", .problems.join("; "))]
    InvalidModel { problems: Vec<String> },

    #[error("training failed: {0}")]
    Training(String),
}

impl ClassifierError {
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    #[must_use]
    pub fn training(message: impl Into<String>) -> Self {
        Self::Training(message.into())
    }
}
