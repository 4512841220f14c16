// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        clippy::float_cmp
    )
)]

pub mod config;
pub mod logging;
pub mod order;
pub mod reorder;
pub mod service;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, AppConfig, ConfigError, ConfigSource, LoggingConfig};
pub use order::{IdKind, ItemId, OrderError, OrderIndex, OrderKind};
pub use reorder::{
    ReconcileError, Reconciler, ReconcilerSettings, ReorderRequest, ReorderResult, RequestItem,
    OrderableItem, UserRequestPrecedence,
};
pub use service::{EntityReorderedEvent, EventBus, ReorderService, ServiceError};
pub use store::{
    build_patches, FileRepository, MemoryRepository, OrderPatch, OrderRepository, RepositoryError,
};
