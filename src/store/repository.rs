use super::{OrderPatch, RepositoryError};
use crate::order::{ItemId, OrderIndex};
use crate::reorder::OrderableItem;
use async_trait::async_trait;

/// Storage for one ordered collection.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    type Id: ItemId;
    type Order: OrderIndex;

    /// Name of the collection, used for locking and events.
    fn collection(&self) -> &str;

    /// Name of the field holding the order value.
    fn order_field(&self) -> &str;

    /// Load every item of the collection with its current order value.
    async fn load_items(
        &self,
    ) -> Result<Vec<OrderableItem<Self::Id, Self::Order>>, RepositoryError>;

    /// Apply all patches or none of them.
    async fn apply_patches(
        &self,
        patches: &[OrderPatch<Self::Id, Self::Order>],
    ) -> Result<(), RepositoryError>;
}

/// Check that every patch targets `field`.
pub(crate) fn check_fields<I, T>(
    patches: &[OrderPatch<I, T>],
    field: &str,
) -> Result<(), RepositoryError> {
    match patches.iter().find(|p| p.field != field) {
        Some(patch) => Err(RepositoryError::FieldMismatch {
            expected: field.to_string(),
            found: patch.field.clone(),
        }),
        None => Ok(()),
    }
}
