use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Catalog must contain at least one item")]
    EmptyCatalog,
    #[error("Duplicate catalog item id: {0}")]
    DuplicateCatalogItem(String),
    #[error("Invalid setting {field}: {reason}")]
    InvalidSettings { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Session has not ended yet")]
    SessionNotFinished,
    #[error("Failed to write score record: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode score record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Score sink rejected record: {0}")]
    Rejected(String),
}
