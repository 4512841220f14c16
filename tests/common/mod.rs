//! Common test utilities

use order_reconciler::{
    EventBus, FileRepository, ItemId, OrderIndex, OrderableItem, ReconcilerSettings,
    ReorderRequest, ReorderService, RequestItem,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write a collection file named `<name>.json` and open a service over it
pub async fn create_collection<I: ItemId, T: OrderIndex>(
    dir: &Path,
    name: &str,
    items: Vec<OrderableItem<I, T>>,
    settings: ReconcilerSettings,
) -> ReorderService<FileRepository<I, T>> {
    let path = collection_path(dir, name);
    let repository = FileRepository::create(path, name, "orderIndex", items)
        .await
        .expect("Failed to create collection");
    ReorderService::new(repository, settings, EventBus::default())
}

pub fn collection_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

/// Build a request from `(id, desired order)` pairs
pub fn request(entries: &[(&str, f64)]) -> ReorderRequest {
    ReorderRequest::new(
        entries
            .iter()
            .map(|(id, order)| RequestItem::new(*id, *order))
            .collect(),
    )
}
