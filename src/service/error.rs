use crate::reorder::ReconcileError;
use crate::store::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Reorder rejected: {0}")]
    Reconcile(#[from] ReconcileError),
}
