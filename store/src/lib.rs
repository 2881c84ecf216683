//! # inventory-store
//!
//! Host-facing inventory built on [`avl_inventory::AvlTree`].
//!
//! The tree itself never picks ids, validates input or formats anything. This
//! crate adds those pieces:
//!
//! - monotonically increasing ids for new items,
//! - price validation,
//! - a single `RwLock` so the store can be shared between threads,
//! - statistics, shape reports and an ASCII rendering,
//! - JSON import/export of records.
//!
//! ## Example
//!
//! ```rust
//! use inventory_store::Inventory;
//!
//! let inv = Inventory::new();
//! let laptop = inv.add_item("Laptop", "Electronics", 999.99, 10).unwrap();
//! let lamp = inv.add_item("Lamp", "Lighting", 49.99, 3).unwrap();
//!
//! assert_eq!(inv.get_item(laptop).map(|r| r.quantity), Some(10));
//! assert_eq!(inv.low_stock(5).len(), 1);
//! assert!(inv.remove_item(lamp));
//! assert!(!inv.remove_item(lamp));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod render;
pub mod report;

pub use avl_inventory::{ItemId, Record};
pub use config::Config;
pub use error::{Result, StoreError};
pub use report::{Hierarchy, InventoryStats, LevelNode, NodeInfo, TreeInfo};

use std::ops::RangeBounds;

use avl_inventory::AvlTree;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

struct State {
    tree: AvlTree,
    /// `None` once `ItemId::MAX` has been taken.
    next_id: Option<ItemId>,
}

/// Shared, thread-safe inventory.
///
/// Mutations take the write lock for their whole duration and every query
/// takes the read lock, so callers always observe a tree between completed
/// operations.
pub struct Inventory {
    state: RwLock<State>,
    config: Config,
}

impl Inventory {
    /// Create an empty inventory with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty inventory with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            state: RwLock::new(State {
                tree: AvlTree::new(),
                next_id: Some(config.first_id),
            }),
            config,
        }
    }

    /// Add a new item under a freshly assigned id and return that id.
    ///
    /// Ids are never reused, even after the item is removed.
    pub fn add_item(
        &self,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Result<ItemId> {
        check_price(price)?;

        let mut state = self.state.write();
        let id = state.next_id.ok_or(StoreError::IdsExhausted)?;
        state.next_id = id.checked_add(1);
        state
            .tree
            .insert(Record::new(id, name, category, price, quantity));

        debug!(id, len = state.tree.len(), "added item");
        Ok(id)
    }

    /// Remove an item. Returns `false` if no item had `id`.
    pub fn remove_item(&self, id: ItemId) -> bool {
        let removed = self.state.write().tree.remove(id).is_some();
        debug!(id, removed, "remove item");
        removed
    }

    /// Look up an item by id.
    pub fn get_item(&self, id: ItemId) -> Option<Record> {
        trace!(id, "get item");
        self.state.read().tree.get(id).cloned()
    }

    /// Replace every field of an existing item except its id.
    ///
    /// Returns `Ok(false)` if no item had `id`.
    pub fn update_item(
        &self,
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Result<bool> {
        check_price(price)?;

        let updated = self
            .state
            .write()
            .tree
            .update(Record::new(id, name, category, price, quantity));
        debug!(id, updated, "update item");
        Ok(updated)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.state.read().tree.len()
    }

    /// `true` when the inventory holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item, ascending by id.
    pub fn all_items(&self) -> Vec<Record> {
        self.state.read().tree.iter().cloned().collect()
    }

    /// Items whose id lies in `ids`, ascending.
    pub fn items_in_range(&self, ids: impl RangeBounds<ItemId>) -> Vec<Record> {
        self.state.read().tree.range(ids).cloned().collect()
    }

    /// Items whose name contains `needle` (case-sensitive).
    pub fn search_by_name(&self, needle: &str) -> Vec<Record> {
        trace!(needle, "search by name");
        self.state.read().tree.search_by_name(needle).cloned().collect()
    }

    /// Items in exactly `category`.
    pub fn search_by_category(&self, category: &str) -> Vec<Record> {
        trace!(category, "search by category");
        self.state
            .read()
            .tree
            .search_by_category(category)
            .cloned()
            .collect()
    }

    /// Items with `quantity <= threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<Record> {
        trace!(threshold, "low stock");
        self.state.read().tree.low_stock(threshold).cloned().collect()
    }

    /// Totals and shape figures for the whole inventory.
    pub fn statistics(&self) -> InventoryStats {
        InventoryStats::from_tree(&self.state.read().tree, self.config.balanced_threshold)
    }

    /// Every node in key order with its balance, depth and height.
    pub fn tree_info(&self) -> TreeInfo {
        TreeInfo::from_tree(&self.state.read().tree, self.config.balanced_threshold)
    }

    /// Level-order view of the tree.
    pub fn hierarchy(&self) -> Hierarchy {
        Hierarchy::from_tree(&self.state.read().tree)
    }

    /// ASCII drawing of the tree, one line per node.
    pub fn visualization(&self) -> Vec<String> {
        render::render(&self.state.read().tree)
    }

    /// Upsert every record of a JSON array, keeping the ids it carries.
    ///
    /// The whole payload is decoded and validated before anything is stored.
    /// Later [`add_item`](Self::add_item) calls continue past the largest
    /// imported id. Returns the number of records read.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        if let Some(bad) = records.iter().find(|r| check_price(r.price).is_err()) {
            warn!(id = bad.id, price = bad.price, "rejecting import");
            return Err(StoreError::InvalidPrice(bad.price));
        }

        let mut state = self.state.write();
        if let Some(max) = records.iter().map(|r| r.id).max() {
            if state.next_id.is_some_and(|next| max >= next) {
                state.next_id = max.checked_add(1);
            }
        }
        let n = records.len();
        state.tree.extend(records);

        debug!(imported = n, len = state.tree.len(), "imported records");
        Ok(n)
    }

    /// Every record as a JSON array, ascending by id.
    pub fn export_json(&self) -> Result<String> {
        let state = self.state.read();
        let records: Vec<&Record> = state.tree.iter().collect();
        Ok(serde_json::to_string(&records)?)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

fn check_price(price: f64) -> Result<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        warn!(price, "rejecting price");
        Err(StoreError::InvalidPrice(price))
    }
}
