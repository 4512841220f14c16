use crate::order::OrderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Item not found in collection: {0}")]
    UnknownItem(String),
}
