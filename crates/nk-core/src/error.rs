use thiserror::Error;

#[derive(Error, Debug)]
pub enum NkError {
    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),
    #[error("Unparsable result page: {0}")]
    UnparsablePage(String),
    #[error("No adjacent result: {0}")]
    NoAdjacentResult(String),
    #[error("Notification failed: {0}")]
    NotificationFailed(String),
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NkError>;
