use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::sync::Mutex as AsyncMutex;

/// One async mutex per collection name, shared across the process.
static COLLECTION_LOCKS: OnceLock<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>> = OnceLock::new();

/// Lock guarding read-modify-write cycles on `collection`.
///
/// Entries no caller holds any more are dropped on each call, so the
/// registry stays bounded by the collections in use.
#[must_use]
pub fn collection_lock(collection: &str) -> Arc<AsyncMutex<()>> {
    let locks = COLLECTION_LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut locks = locks.lock().unwrap_or_else(PoisonError::into_inner);
    locks.retain(|name, lock| name == collection || Arc::strong_count(lock) > 1);
    Arc::clone(
        locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
    )
}
