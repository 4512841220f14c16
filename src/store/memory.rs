use super::repository::check_fields;
use super::{OrderPatch, OrderRepository, RepositoryError};
use crate::order::{ItemId, OrderIndex};
use crate::reorder::OrderableItem;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// In-memory collection, mainly for tests and previews.
#[derive(Debug)]
pub struct MemoryRepository<I, T> {
    name: String,
    field: String,
    items: Mutex<BTreeMap<I, Option<T>>>,
}

impl<I: ItemId, T: OrderIndex> MemoryRepository<I, T> {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        items: impl IntoIterator<Item = OrderableItem<I, T>>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            items: Mutex::new(items.into_iter().map(|i| (i.id, i.order)).collect()),
        }
    }

    /// Current items, ascending by id.
    pub async fn snapshot(&self) -> Vec<OrderableItem<I, T>> {
        self.items
            .lock()
            .await
            .iter()
            .map(|(id, order)| OrderableItem::new(id.clone(), *order))
            .collect()
    }
}

#[async_trait]
impl<I: ItemId, T: OrderIndex> OrderRepository for MemoryRepository<I, T> {
    type Id = I;
    type Order = T;

    fn collection(&self) -> &str {
        &self.name
    }

    fn order_field(&self) -> &str {
        &self.field
    }

    async fn load_items(&self) -> Result<Vec<OrderableItem<I, T>>, RepositoryError> {
        Ok(self.snapshot().await)
    }

    async fn apply_patches(&self, patches: &[OrderPatch<I, T>]) -> Result<(), RepositoryError> {
        check_fields(patches, &self.field)?;
        let mut items = self.items.lock().await;
        if let Some(missing) = patches.iter().find(|p| !items.contains_key(&p.id)) {
            return Err(RepositoryError::NotFound(missing.id.to_string()));
        }
        for patch in patches {
            items.insert(patch.id.clone(), Some(patch.value));
        }
        Ok(())
    }
}
