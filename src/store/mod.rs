//! Persistence of reorder results.
//!
//! The reconciler only computes a mapping; repositories load collections and
//! apply the mapping as a batch of [`OrderPatch`]es.

mod error;
mod file;
mod memory;
mod patch;
mod repository;

pub use error::RepositoryError;
pub use file::{read_header, CollectionFile, CollectionHeader, FileRepository, DEFAULT_ORDER_FIELD};
pub use memory::MemoryRepository;
pub use patch::{build_patches, OrderPatch};
pub use repository::OrderRepository;
