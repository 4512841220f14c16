use crate::reorder::ReorderResult;
use crate::order::{ItemId, OrderIndex};
use serde::Serialize;

/// Partial update of a single field of a single item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch<I, T> {
    pub id: I,
    pub field: String,
    pub value: T,
}

/// Turn a reorder result into one patch per id, ascending by id.
#[must_use]
pub fn build_patches<I: ItemId, T: OrderIndex>(
    result: &ReorderResult<I, T>,
    field: &str,
) -> Vec<OrderPatch<I, T>> {
    result
        .orders
        .iter()
        .map(|(id, value)| OrderPatch {
            id: id.clone(),
            field: field.to_string(),
            value: *value,
        })
        .collect()
}
