//! Reorders against a repository, one collection at a time.

mod error;
mod events;
mod locks;

pub use error::ServiceError;
pub use events::{EntityReorderedEvent, EventBus, DEFAULT_EVENT_CAPACITY};
pub use locks::collection_lock;

use crate::reorder::{ReconcilerSettings, Reconciler, ReorderRequest, ReorderResult};
use crate::store::{build_patches, OrderRepository};
use chrono::Utc;
use tracing::{info, instrument};

type ResultOf<R> = ReorderResult<<R as OrderRepository>::Id, <R as OrderRepository>::Order>;

/// Loads a collection, reconciles a request against it and persists the
/// outcome.
#[derive(Debug)]
pub struct ReorderService<R> {
    repository: R,
    reconciler: Reconciler,
    events: EventBus,
}

impl<R: OrderRepository> ReorderService<R> {
    #[must_use]
    pub fn new(repository: R, settings: ReconcilerSettings, events: EventBus) -> Self {
        Self {
            repository,
            reconciler: Reconciler::new(settings),
            events,
        }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Reconcile `request`, write the new values and announce them.
    ///
    /// The collection lock is held from load until the patches are written,
    /// so concurrent reorders of one collection never see each other's
    /// partial state. Nothing is published if persisting fails.
    #[instrument(
        name = "reorder.apply",
        skip(self, request),
        fields(collection = %self.repository.collection(), requested = request.items.len())
    )]
    pub async fn reorder(&self, request: &ReorderRequest) -> Result<ResultOf<R>, ServiceError> {
        let lock = collection_lock(self.repository.collection());
        let _guard = lock.lock().await;

        let items = self.repository.load_items().await?;
        let result = self.reconciler.reorder(&items, request)?;
        if result.is_empty() {
            info!("Nothing to reorder");
            return Ok(result);
        }

        let patches = build_patches(&result, self.repository.order_field());
        self.repository.apply_patches(&patches).await?;

        let event = EntityReorderedEvent {
            collection: self.repository.collection().to_string(),
            ids: result.affected_ids().map(ToString::to_string).collect(),
            occurred_at: Utc::now(),
        };
        let receivers = self.events.publish(event);
        info!(
            "Persisted {} order values, notified {receivers} subscribers",
            patches.len()
        );
        Ok(result)
    }

    /// Compute what [`ReorderService::reorder`] would write without writing
    /// or publishing anything.
    #[instrument(
        name = "reorder.preview",
        skip(self, request),
        fields(collection = %self.repository.collection())
    )]
    pub async fn preview(&self, request: &ReorderRequest) -> Result<ResultOf<R>, ServiceError> {
        let items = self.repository.load_items().await?;
        Ok(self.reconciler.reorder(&items, request)?)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
