use crate::order::OrderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Patch targets field '{found}' but the collection orders by '{expected}'")]
    FieldMismatch { expected: String, found: String },

    #[error("Collection stores {found} order values, not {expected}")]
    KindMismatch { expected: String, found: String },

    #[error(transparent)]
    Order(#[from] OrderError),
}
