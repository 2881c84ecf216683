//! Store configuration.

use avl_inventory::ItemId;

/// Configuration for an [`Inventory`](crate::Inventory).
#[derive(Debug, Clone)]
pub struct Config {
    /// Id handed to the first item added through [`add_item`](crate::Inventory::add_item).
    pub first_id: ItemId,
    /// Balance quality (percent) strictly above which reports call the tree balanced.
    pub balanced_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_id: 1,
            balanced_threshold: 95.0,
        }
    }
}
