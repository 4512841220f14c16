//! Order index allocation.
//!
//! [`OrderSet`] tracks the order values already taken in a collection and
//! hands out the next free one by unit increments.

use crate::order::{OrderError, OrderIndex, Ordinal};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A sorted set of occupied order values.
#[derive(Debug, Clone)]
pub struct OrderSet<T: OrderIndex> {
    values: BTreeSet<Ordinal<T>>,
}

impl<T: OrderIndex> Default for OrderSet<T> {
    fn default() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }
}

impl<T: OrderIndex> OrderSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the value was not yet present.
    pub fn insert(&mut self, value: T) -> bool {
        self.values.insert(Ordinal(value))
    }

    pub fn remove(&mut self, value: T) -> bool {
        self.values.remove(&Ordinal(value))
    }

    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&Ordinal(value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.values.last().map(|o| o.0)
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().map(|o| o.0)
    }

    /// Union of `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &OrderSet<T>) -> OrderSet<T> {
        let mut merged = self.clone();
        merged.values.extend(other.values.iter().copied());
        merged
    }

    /// Smallest value `>= candidate`, reached by unit steps, that is not
    /// in this set.
    pub fn next_available(&self, candidate: T) -> Result<T, OrderError> {
        next_available(candidate, self)
    }
}

impl<T: OrderIndex> FromIterator<T> for OrderSet<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self {
            values: iter.into_iter().map(Ordinal).collect(),
        }
    }
}

impl<T: OrderIndex> Extend<T> for OrderSet<T> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        self.values.extend(iter.into_iter().map(Ordinal));
    }
}

/// Returns the smallest value `>= candidate`, stepping by one, that is not
/// present in `used`.
///
/// Walks the occupied values at or above `candidate` once instead of probing
/// the set per step. Fails with [`OrderError::Overflow`] when the order type
/// can no longer be incremented.
pub fn next_available<T: OrderIndex>(candidate: T, used: &OrderSet<T>) -> Result<T, OrderError> {
    let mut current = candidate;
    for taken in used.values.range(Ordinal(candidate)..) {
        match taken.0.order_cmp(&current) {
            Ordering::Less => {}
            Ordering::Equal => {
                current = current
                    .checked_add_one()
                    .ok_or_else(|| OrderError::Overflow(current.to_string()))?;
            }
            Ordering::Greater => break,
        }
    }
    Ok(current)
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
