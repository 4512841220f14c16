//! Duplicate and conflict resolution for reorder requests.

use super::allocator::OrderSet;
use super::types::OrderAssignment;
use crate::order::{ItemId, OrderError, OrderIndex, Ordinal};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A request whose order values are unique among its own entries.
#[derive(Debug, Clone)]
pub struct RequestResolution<I: ItemId, T: OrderIndex> {
    /// Resolved entries, ascending by desired value then id
    pub entries: Vec<OrderAssignment<I, T>>,
    /// Order values claimed by the request
    pub used: OrderSet<T>,
    /// Ids moved away from their desired value
    pub adjusted: BTreeSet<I>,
}

/// De-duplicate the order values inside a request.
///
/// Entries are grouped by desired value. Values requested by a single entry
/// pass through unchanged and are reserved first; groups sharing a value are
/// sorted by id and given a contiguous run of free values starting at the
/// shared value.
pub fn resolve_duplicates<I: ItemId, T: OrderIndex>(
    requested: &[OrderAssignment<I, T>],
) -> Result<RequestResolution<I, T>, OrderError> {
    let mut groups: BTreeMap<Ordinal<T>, Vec<&OrderAssignment<I, T>>> = BTreeMap::new();
    for entry in requested {
        groups.entry(Ordinal(entry.order)).or_default().push(entry);
    }

    let mut used = OrderSet::new();
    for (value, group) in &groups {
        if group.len() == 1 {
            used.insert(value.0);
        }
    }

    let mut entries = Vec::with_capacity(requested.len());
    let mut adjusted = BTreeSet::new();
    for (value, mut group) in groups {
        if let [single] = group.as_slice() {
            entries.push((*single).clone());
            continue;
        }

        group.sort_by(|a, b| a.id.cmp(&b.id));
        for entry in group {
            let order = used.next_available(value.0)?;
            used.insert(order);
            if Ordinal(order) != value {
                adjusted.insert(entry.id.clone());
            }
            entries.push(OrderAssignment {
                id: entry.id.clone(),
                order,
            });
        }
        debug!("Resolved duplicate requested order {}", value.0);
    }

    Ok(RequestResolution {
        entries,
        used,
        adjusted,
    })
}

/// Move resolved request values off the values held by items outside the
/// request.
///
/// A conflicting entry is reallocated to the next value free in both the
/// request and `existing`.
pub fn avoid_conflicts<I: ItemId, T: OrderIndex>(
    resolution: &mut RequestResolution<I, T>,
    existing: &OrderSet<T>,
) -> Result<(), OrderError> {
    let mut blocked: Option<OrderSet<T>> = None;
    for entry in &mut resolution.entries {
        if !existing.contains(entry.order) {
            continue;
        }

        let blocked = blocked.get_or_insert_with(|| resolution.used.union(existing));
        let alternative = blocked.next_available(entry.order)?;
        blocked.insert(alternative);
        debug!(
            "Requested order {} for {} is held by another item; using {}",
            entry.order, entry.id, alternative
        );
        resolution.used.remove(entry.order);
        resolution.used.insert(alternative);
        resolution.adjusted.insert(entry.id.clone());
        entry.order = alternative;
    }
    Ok(())
}

/// Separate items outside the request that already share an order value.
///
/// For each shared value the smallest id keeps it; every other holder moves
/// to the next value free in `occupied`, which is updated as values are
/// taken. Returns the moved items.
pub fn repair_existing_duplicates<I: ItemId, T: OrderIndex>(
    ordered: &[OrderAssignment<I, T>],
    occupied: &mut OrderSet<T>,
) -> Result<Vec<OrderAssignment<I, T>>, OrderError> {
    let mut groups: BTreeMap<Ordinal<T>, Vec<&I>> = BTreeMap::new();
    for entry in ordered {
        groups.entry(Ordinal(entry.order)).or_default().push(&entry.id);
    }

    let mut moved = Vec::new();
    for (value, mut holders) in groups {
        if holders.len() < 2 {
            continue;
        }
        warn!(
            "{} items share order value {}; keeping the smallest id",
            holders.len(),
            value.0
        );
        holders.sort();
        for id in holders.into_iter().skip(1) {
            let order = occupied.next_available(value.0)?;
            occupied.insert(order);
            moved.push(OrderAssignment {
                id: id.clone(),
                order,
            });
        }
    }
    Ok(moved)
}

#[cfg(test)]
#[path = "duplicates_tests.rs"]
mod tests;
