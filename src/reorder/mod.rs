//! Order reconciliation for collections of ordered items.
//!
//! Given every item of a collection (with optional, possibly duplicated
//! order values) and a partial reorder request, the [`Reconciler`] computes
//! a deterministic `{id -> order}` mapping. Applying the mapping is left to
//! a repository, see [`crate::store`].

mod allocator;
mod duplicates;
mod error;
mod gaps;
mod nulls;
mod orchestrator;
mod policy;
mod types;

pub use allocator::{next_available, OrderSet};
pub use duplicates::{
    avoid_conflicts, repair_existing_duplicates, resolve_duplicates, RequestResolution,
};
pub use error::ReconcileError;
pub use gaps::find_gaps;
pub use nulls::integrate_nulls;
pub use orchestrator::Reconciler;
pub use policy::{ReconcilerSettings, UserRequestPrecedence};
pub use types::{OrderAssignment, OrderableItem, ReorderRequest, ReorderResult, RequestItem};
