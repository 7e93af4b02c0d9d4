//! The in-memory item store.
//!
//! [`ItemStore`] owns an ordered sequence of [`Item`]s addressed by
//! zero-based position. Positions are not stable identifiers: deleting an
//! item shifts every later item down by one, so callers must not cache an
//! index across mutations.
//!
//! All access goes through a single [`RwLock`]. Every operation holds the
//! lock for its entire read-modify-write sequence, so a bounds check and
//! the mutation it guards can never be split by another writer.

use itemstore_types::Item;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors returned by index-addressed store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The index is outside `[0, len)` at the time of the call.
    #[error("Item {index} not found")]
    NotFound {
        /// The index exactly as the caller supplied it.
        index: i64,
    },
}

/// Ordered, lock-guarded item sequence held for the process lifetime.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items` in order.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Append `item` and return the full sequence after the append.
    ///
    /// The new item's index is `returned.len() - 1`.
    pub async fn create(&self, item: Item) -> Vec<Item> {
        let mut items = self.items.write().await;
        items.push(item);
        debug!(len = items.len(), "item created");
        items.clone()
    }

    /// Return the first `min(limit, len)` items in insertion order.
    pub async fn list(&self, limit: usize) -> Vec<Item> {
        let items = self.items.read().await;
        items.iter().take(limit).cloned().collect()
    }

    /// Return the item at `index`.
    pub async fn get(&self, index: i64) -> Result<Item, StoreError> {
        let items = self.items.read().await;
        position(index, items.len())
            .and_then(|pos| items.get(pos))
            .cloned()
            .ok_or(StoreError::NotFound { index })
    }

    /// Replace the item at `index` in place and return the replacement.
    pub async fn update(&self, index: i64, item: Item) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let slot = position(index, items.len())
            .and_then(|pos| items.get_mut(pos))
            .ok_or(StoreError::NotFound { index })?;
        *slot = item.clone();
        debug!(index, "item updated");
        Ok(item)
    }

    /// Remove the item at `index`, shifting later items down by one.
    ///
    /// Returns the removed item.
    pub async fn delete(&self, index: i64) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let pos = position(index, items.len()).ok_or(StoreError::NotFound { index })?;
        let removed = items.remove(pos);
        debug!(index, len = items.len(), "item deleted");
        Ok(removed)
    }

    /// Current number of items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Map a caller-supplied index onto a valid position, if there is one.
///
/// Negative indices never wrap around to the end of the sequence.
fn position(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&pos| pos < len)
}
