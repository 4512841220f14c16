//! Order index and identifier abstractions.
//!
//! Collections store their order in one of several numeric representations
//! and identify rows by integers, strings or UUIDs. The reconciler is generic
//! over both through the [`OrderIndex`] and [`ItemId`] traits.

mod error;
mod id;
mod index;
mod kind;

pub use error::OrderError;
pub use id::{IdKind, ItemId};
pub use index::{OrderIndex, Ordinal};
pub use kind::OrderKind;

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
