use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Published once a reorder has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReorderedEvent {
    pub collection: String,
    /// Every id whose order value was written, ascending.
    pub ids: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Fan-out of reorder events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EntityReorderedEvent>,
}

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntityReorderedEvent> {
        self.sender.subscribe()
    }

    /// Send `event` to current subscribers and return how many received it.
    pub fn publish(&self, event: EntityReorderedEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(
                    "No subscribers for reorder event on {}",
                    event.collection
                );
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
