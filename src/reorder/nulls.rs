//! Order assignment for items that have no order value.

use super::allocator::OrderSet;
use super::gaps::find_gaps;
use super::types::OrderAssignment;
use crate::order::{ItemId, OrderError, OrderIndex};
use tracing::debug;

/// Assign order values to items without one.
///
/// `unordered` must be ascending by id. When nothing in the collection is
/// ordered yet (`used` and `existing` both empty) the items are numbered
/// 1, 2, 3... Otherwise they first fill the gaps between the occupied
/// values, then continue after the largest occupied value.
pub fn integrate_nulls<I: ItemId, T: OrderIndex>(
    unordered: &[I],
    used: &OrderSet<T>,
    existing: &OrderSet<T>,
) -> Result<Vec<OrderAssignment<I, T>>, OrderError> {
    if unordered.is_empty() {
        return Ok(Vec::new());
    }

    if used.is_empty() && existing.is_empty() {
        return number_from_one(unordered);
    }

    let mut occupied = used.union(existing);
    let sorted: Vec<T> = occupied.iter().collect();
    let mut gaps = find_gaps(&sorted).into_iter();

    let mut assignments = Vec::with_capacity(unordered.len());
    for id in unordered {
        let order = match gaps.next() {
            Some(gap) => gap,
            None => append_after(&occupied)?,
        };
        occupied.insert(order);
        assignments.push(OrderAssignment {
            id: id.clone(),
            order,
        });
    }

    debug!(
        "Assigned order values to {} unordered items",
        assignments.len()
    );
    Ok(assignments)
}

/// The value one past the largest occupied value.
fn append_after<T: OrderIndex>(occupied: &OrderSet<T>) -> Result<T, OrderError> {
    match occupied.max() {
        Some(max) => max
            .checked_add_one()
            .ok_or_else(|| OrderError::Overflow(max.to_string())),
        None => Ok(T::ONE),
    }
}

fn number_from_one<I: ItemId, T: OrderIndex>(
    unordered: &[I],
) -> Result<Vec<OrderAssignment<I, T>>, OrderError> {
    let mut order = T::ONE;
    let mut assignments = Vec::with_capacity(unordered.len());
    for (position, id) in unordered.iter().enumerate() {
        if position > 0 {
            order = order
                .checked_add_one()
                .ok_or_else(|| OrderError::Overflow(order.to_string()))?;
        }
        assignments.push(OrderAssignment {
            id: id.clone(),
            order,
        });
    }
    Ok(assignments)
}

#[cfg(test)]
#[path = "nulls_tests.rs"]
mod tests;
