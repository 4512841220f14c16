//! Reconciliation of a reorder request against a full collection snapshot.
//!
//! A reorder runs in a single pass:
//! 1. Capture which items have an order value and which do not
//! 2. Convert the request and de-duplicate its values
//! 3. Under [`UserRequestPrecedence::ConflictAvoid`], move requested values
//!    off values held by the rest of the collection
//!    and separate untouched items that share a value
//! 4. Give every unordered item a value
//! 5. Merge all assignments into one mapping

use super::allocator::OrderSet;
use super::duplicates::{avoid_conflicts, repair_existing_duplicates, resolve_duplicates};
use super::error::ReconcileError;
use super::nulls::integrate_nulls;
use super::policy::{ReconcilerSettings, UserRequestPrecedence};
use super::types::{OrderAssignment, OrderableItem, ReorderRequest, ReorderResult};
use crate::order::{ItemId, OrderIndex};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Computes conflict-free order values for a collection.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    settings: ReconcilerSettings,
}

/// Items split by whether they currently have an order value.
struct Snapshot<I, T> {
    ordered: BTreeMap<I, T>,
    unordered: BTreeSet<I>,
}

impl<I: ItemId, T: OrderIndex> Snapshot<I, T> {
    fn capture(items: &[OrderableItem<I, T>], zero_is_unset: bool) -> Self {
        let mut ordered = BTreeMap::new();
        let mut unordered = BTreeSet::new();
        for item in items {
            match item.order {
                Some(order) if !(zero_is_unset && order.is_zero()) => {
                    ordered.insert(item.id.clone(), order);
                }
                _ => {
                    unordered.insert(item.id.clone());
                }
            }
        }
        Self { ordered, unordered }
    }

    fn contains(&self, id: &I) -> bool {
        self.ordered.contains_key(id) || self.unordered.contains(id)
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(settings: ReconcilerSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }

    /// Compute the final `{id -> order}` mapping for `items` given `request`.
    ///
    /// The mapping covers every requested item and every item without an
    /// order value. Items outside the request that hold a value of their own
    /// are never part of it.
    pub fn reorder<I: ItemId, T: OrderIndex>(
        &self,
        items: &[OrderableItem<I, T>],
        request: &ReorderRequest,
    ) -> Result<ReorderResult<I, T>, ReconcileError> {
        let snapshot = Snapshot::capture(items, self.settings.treat_zero_as_unset);
        let requested = convert_request(request, &snapshot)?;
        debug!(
            "Reordering {} items: {} ordered, {} unordered, {} requested",
            items.len(),
            snapshot.ordered.len(),
            snapshot.unordered.len(),
            requested.len()
        );

        let result = match self.settings.precedence {
            UserRequestPrecedence::ConflictAvoid => conflict_avoid(&snapshot, &requested)?,
            UserRequestPrecedence::Overwrite => overwrite(&snapshot, &requested)?,
        };

        info!(
            "Reorder ({}) assigned {} values: {} requested, {} adjusted, {} initialized, {} repaired",
            self.settings.precedence,
            result.orders.len(),
            result.requested.len(),
            result.adjusted.len(),
            result.initialized.len(),
            result.repaired.len()
        );
        Ok(result)
    }
}

/// Parse request ids and values into the collection's types.
///
/// When an id is listed more than once the last entry wins.
fn convert_request<I: ItemId, T: OrderIndex>(
    request: &ReorderRequest,
    snapshot: &Snapshot<I, T>,
) -> Result<Vec<OrderAssignment<I, T>>, ReconcileError> {
    let mut by_id = BTreeMap::new();
    for item in &request.items {
        let id = I::parse_id(&item.id)?;
        if !snapshot.contains(&id) {
            return Err(ReconcileError::UnknownItem(item.id.clone()));
        }
        let order = T::from_requested(item.desired_order)?;
        if by_id.insert(id, order).is_some() {
            warn!(
                "Request lists item {} more than once; keeping the last entry",
                item.id
            );
        }
    }
    Ok(by_id
        .into_iter()
        .map(|(id, order)| OrderAssignment { id, order })
        .collect())
}

fn conflict_avoid<I: ItemId, T: OrderIndex>(
    snapshot: &Snapshot<I, T>,
    requested: &[OrderAssignment<I, T>],
) -> Result<ReorderResult<I, T>, ReconcileError> {
    let requested_ids: BTreeSet<I> = requested.iter().map(|e| e.id.clone()).collect();

    let mut resolution = resolve_duplicates(requested)?;
    let others: Vec<OrderAssignment<I, T>> = snapshot
        .ordered
        .iter()
        .filter(|(id, _)| !requested_ids.contains(*id))
        .map(|(id, order)| OrderAssignment {
            id: id.clone(),
            order: *order,
        })
        .collect();
    let mut existing: OrderSet<T> = others.iter().map(|e| e.order).collect();
    avoid_conflicts(&mut resolution, &existing)?;

    let mut occupied = resolution.used.union(&existing);
    let repaired = repair_existing_duplicates(&others, &mut occupied)?;
    existing.extend(repaired.iter().map(|e| e.order));

    let unordered: Vec<I> = snapshot
        .unordered
        .iter()
        .filter(|id| !requested_ids.contains(*id))
        .cloned()
        .collect();
    let initialized = integrate_nulls(&unordered, &resolution.used, &existing)?;

    let mut result = ReorderResult {
        requested: requested_ids,
        adjusted: resolution.adjusted,
        ..ReorderResult::default()
    };
    for entry in resolution.entries {
        result.orders.insert(entry.id, entry.order);
    }
    for entry in repaired {
        result.repaired.insert(entry.id.clone());
        result.orders.insert(entry.id, entry.order);
    }
    for assignment in initialized {
        result.initialized.insert(assignment.id.clone());
        result.orders.insert(assignment.id, assignment.order);
    }
    Ok(result)
}

/// Initialize every unordered item against the current values, then write
/// the (de-duplicated) request over the top.
fn overwrite<I: ItemId, T: OrderIndex>(
    snapshot: &Snapshot<I, T>,
    requested: &[OrderAssignment<I, T>],
) -> Result<ReorderResult<I, T>, ReconcileError> {
    let requested_ids: BTreeSet<I> = requested.iter().map(|e| e.id.clone()).collect();

    let existing: OrderSet<T> = snapshot.ordered.values().copied().collect();
    let unordered: Vec<I> = snapshot.unordered.iter().cloned().collect();
    let initialized = integrate_nulls(&unordered, &OrderSet::new(), &existing)?;

    let resolution = resolve_duplicates(requested)?;

    let mut result = ReorderResult {
        requested: requested_ids,
        adjusted: resolution.adjusted,
        ..ReorderResult::default()
    };
    for assignment in initialized {
        if result.requested.contains(&assignment.id) {
            continue;
        }
        result.initialized.insert(assignment.id.clone());
        result.orders.insert(assignment.id, assignment.order);
    }
    for entry in resolution.entries {
        result.orders.insert(entry.id, entry.order);
    }
    Ok(result)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
