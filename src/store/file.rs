//! JSON file backed collections.
//!
//! A collection file looks like:
//!
//! ```json
//! {
//!   "name": "menu-items",
//!   "orderField": "orderIndex",
//!   "orderKind": "int32",
//!   "idKind": "integer",
//!   "items": [{ "id": 1, "order": 2 }, { "id": 2, "order": null }]
//! }
//! ```
//!
//! The file is re-read on every load and rewritten atomically on every
//! patch, so a failed write leaves the previous content in place.

use super::repository::check_fields;
use super::{OrderPatch, OrderRepository, RepositoryError};
use crate::order::{IdKind, ItemId, OrderIndex, OrderKind};
use crate::reorder::OrderableItem;
use crate::utils::atomic_write;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default name of the order field.
pub const DEFAULT_ORDER_FIELD: &str = "orderIndex";

fn default_order_field() -> String {
    DEFAULT_ORDER_FIELD.to_string()
}

fn default_id_kind() -> String {
    IdKind::Integer.as_str().to_string()
}

/// Collection metadata stored alongside the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionHeader {
    pub name: String,
    #[serde(default = "default_order_field")]
    pub order_field: String,
    pub order_kind: String,
    #[serde(default = "default_id_kind")]
    pub id_kind: String,
}

impl CollectionHeader {
    pub fn order_kind(&self) -> Result<OrderKind, RepositoryError> {
        Ok(self.order_kind.parse()?)
    }

    pub fn id_kind(&self) -> Result<IdKind, RepositoryError> {
        Ok(self.id_kind.parse()?)
    }
}

/// Full content of a collection file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFile<I, T> {
    #[serde(flatten)]
    pub header: CollectionHeader,
    #[serde(default = "Vec::new")]
    pub items: Vec<OrderableItem<I, T>>,
}

/// Read only the header of a collection file.
pub async fn read_header(path: &Path) -> Result<CollectionHeader, RepositoryError> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Collection persisted as a single JSON file.
#[derive(Debug)]
pub struct FileRepository<I, T> {
    path: PathBuf,
    header: CollectionHeader,
    _types: PhantomData<fn() -> (I, T)>,
}

impl<I: ItemId, T: OrderIndex> FileRepository<I, T> {
    /// Open an existing collection file.
    ///
    /// Fails if the file declares an order or id representation other than
    /// `T` and `I`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let header = read_header(&path).await?;
        let order_kind = header.order_kind()?;
        if !order_kind.stored_as(T::KIND) {
            return Err(RepositoryError::KindMismatch {
                expected: T::KIND.to_string(),
                found: order_kind.to_string(),
            });
        }
        let id_kind = header.id_kind()?;
        if id_kind != I::ID_KIND {
            return Err(RepositoryError::KindMismatch {
                expected: I::ID_KIND.to_string(),
                found: id_kind.to_string(),
            });
        }
        Ok(Self {
            path,
            header,
            _types: PhantomData,
        })
    }

    /// Write a new collection file and open it.
    pub async fn create(
        path: impl Into<PathBuf>,
        name: &str,
        order_field: &str,
        items: Vec<OrderableItem<I, T>>,
    ) -> Result<Self, RepositoryError> {
        let path = path.into();
        let file = CollectionFile {
            header: CollectionHeader {
                name: name.to_string(),
                order_field: order_field.to_string(),
                order_kind: T::KIND.to_string(),
                id_kind: I::ID_KIND.to_string(),
            },
            items,
        };
        write_collection(&path, &file).await?;
        Self::open(path).await
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn header(&self) -> &CollectionHeader {
        &self.header
    }

    async fn read(&self) -> Result<CollectionFile<I, T>, RepositoryError> {
        let content = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

async fn write_collection<I: ItemId, T: OrderIndex>(
    path: &Path,
    file: &CollectionFile<I, T>,
) -> Result<(), RepositoryError> {
    let content = serde_json::to_string_pretty(file)?;
    atomic_write(path, &content).await?;
    Ok(())
}

#[async_trait]
impl<I: ItemId, T: OrderIndex> OrderRepository for FileRepository<I, T> {
    type Id = I;
    type Order = T;

    fn collection(&self) -> &str {
        &self.header.name
    }

    fn order_field(&self) -> &str {
        &self.header.order_field
    }

    async fn load_items(&self) -> Result<Vec<OrderableItem<I, T>>, RepositoryError> {
        Ok(self.read().await?.items)
    }

    async fn apply_patches(&self, patches: &[OrderPatch<I, T>]) -> Result<(), RepositoryError> {
        check_fields(patches, &self.header.order_field)?;
        if patches.is_empty() {
            return Ok(());
        }

        let mut file = self.read().await?;
        let positions: BTreeMap<I, usize> = file
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id.clone(), position))
            .collect();

        for patch in patches {
            let item = positions
                .get(&patch.id)
                .and_then(|position| file.items.get_mut(*position))
                .ok_or_else(|| RepositoryError::NotFound(patch.id.to_string()))?;
            item.order = Some(patch.value);
        }

        write_collection(&self.path, &file).await?;
        debug!(
            "Wrote {} order values to {}",
            patches.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
