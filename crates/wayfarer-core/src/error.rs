use thiserror::Error;

#[derive(Debug, Error)]
pub enum WayfarerError {
    #[error("invalid job status: {0}")]
    InvalidStatus(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WayfarerError>;
