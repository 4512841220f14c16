use crate::order::{ItemId, OrderIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of an ordered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderableItem<I, T> {
    pub id: I,
    pub order: Option<T>,
}

impl<I, T> OrderableItem<I, T> {
    #[must_use]
    pub fn new(id: I, order: Option<T>) -> Self {
        Self { id, order }
    }
}

/// A single entry of a reorder request, as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: String,
    #[serde(alias = "orderIndex")]
    pub desired_order: f64,
}

impl RequestItem {
    #[must_use]
    pub fn new(id: impl Into<String>, desired_order: f64) -> Self {
        Self {
            id: id.into(),
            desired_order,
        }
    }
}

/// User-supplied partial ordering intent for a subset of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub items: Vec<RequestItem>,
}

impl ReorderRequest {
    #[must_use]
    pub fn new(items: Vec<RequestItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An order value assigned to an id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAssignment<I, T> {
    pub id: I,
    pub order: T,
}

/// Final `{id -> order}` mapping produced by a reorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderResult<I: Ord, T> {
    /// Every id whose order value must be written
    pub orders: BTreeMap<I, T>,
    /// Ids that were part of the request
    pub requested: BTreeSet<I>,
    /// Requested ids that did not receive their desired value
    pub adjusted: BTreeSet<I>,
    /// Ids that had no order value and were given one
    pub initialized: BTreeSet<I>,
    /// Ids outside the request moved off a value they shared with another item
    pub repaired: BTreeSet<I>,
}

impl<I: ItemId, T: OrderIndex> ReorderResult<I, T> {
    #[must_use]
    pub fn get(&self, id: &I) -> Option<T> {
        self.orders.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Ids touched by this reorder, in ascending order.
    pub fn affected_ids(&self) -> impl Iterator<Item = &I> + '_ {
        self.orders.keys()
    }
}

impl<I: Ord, T> Default for ReorderResult<I, T> {
    fn default() -> Self {
        Self {
            orders: BTreeMap::new(),
            requested: BTreeSet::new(),
            adjusted: BTreeSet::new(),
            initialized: BTreeSet::new(),
            repaired: BTreeSet::new(),
        }
    }
}
