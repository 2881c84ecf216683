//! Serializable summaries of the store and of the tree's shape.

use std::collections::HashSet;

use avl_inventory::{AvlTree, ItemId, NodeRef};
use serde::Serialize;

/// Aggregate figures for the whole inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStats {
    /// Items counted by walking the tree.
    pub total_items: usize,
    /// Sum of `price * quantity`.
    pub total_value: f64,
    /// Height of the root; 0 when empty.
    pub tree_height: u32,
    /// Distinct category strings.
    pub unique_categories: usize,
    /// Percentage of nodes within the AVL balance bound.
    pub balance_quality: f64,
    /// Mean node depth, root at 0.
    pub avg_depth: f64,
    /// `balance_quality` is above the configured threshold.
    pub is_balanced: bool,
}

impl InventoryStats {
    pub(crate) fn from_tree(tree: &AvlTree, balanced_threshold: f64) -> Self {
        let shape = tree.stats();
        let categories: HashSet<&str> = tree.iter().map(|r| r.category.as_str()).collect();
        Self {
            total_items: shape.count,
            total_value: tree.total_value(),
            tree_height: shape.height,
            unique_categories: categories.len(),
            balance_quality: shape.balance_quality,
            avg_depth: shape.avg_depth,
            is_balanced: shape.balance_quality > balanced_threshold,
        }
    }
}

/// One node of [`TreeInfo`]: the record plus its position in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct NodeInfo {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    /// `height(left) - height(right)`.
    pub balance: i32,
    /// Root is at depth 0.
    pub depth: usize,
    pub height: u32,
}

impl From<NodeRef<'_>> for NodeInfo {
    fn from(n: NodeRef<'_>) -> Self {
        let r = n.record();
        Self {
            id: r.id,
            name: r.name.clone(),
            category: r.category.clone(),
            price: r.price,
            quantity: r.quantity,
            balance: n.balance(),
            depth: n.depth(),
            height: n.height(),
        }
    }
}

/// Every node in key order with balance and depth, plus shape totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeInfo {
    /// Nodes in ascending id order.
    pub nodes: Vec<NodeInfo>,
    /// Number of nodes.
    pub count: usize,
    /// Height of the root; 0 when empty.
    pub height: u32,
    /// Percentage of nodes within the AVL balance bound.
    pub balance_quality: f64,
    /// Mean absolute balance factor.
    pub avg_balance: f64,
    /// Nodes within the AVL balance bound.
    pub well_balanced_nodes: usize,
    /// `balance_quality` is above the configured threshold.
    pub is_avl_balanced: bool,
}

impl TreeInfo {
    pub(crate) fn from_tree(tree: &AvlTree, balanced_threshold: f64) -> Self {
        let shape = tree.stats();
        Self {
            nodes: tree.nodes().map(NodeInfo::from).collect(),
            count: shape.count,
            height: shape.height,
            balance_quality: shape.balance_quality,
            avg_balance: shape.avg_abs_balance,
            well_balanced_nodes: shape.well_balanced_nodes,
            is_avl_balanced: shape.balance_quality > balanced_threshold,
        }
    }
}

/// One present node of a [`Hierarchy`] level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct LevelNode {
    pub id: ItemId,
    pub name: String,
    pub height: u32,
    pub balance: i32,
    pub has_left: bool,
    pub has_right: bool,
}

/// Level-order listing. `None` marks an absent child of a node on the
/// previous level; it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hierarchy {
    /// Levels from the root down.
    pub levels: Vec<Vec<Option<LevelNode>>>,
}

impl Hierarchy {
    pub(crate) fn from_tree(tree: &AvlTree) -> Self {
        let levels = tree
            .levels()
            .map(|level| {
                level
                    .into_iter()
                    .map(|slot| {
                        slot.map(|n| LevelNode {
                            id: n.id(),
                            name: n.record().name.clone(),
                            height: n.height(),
                            balance: n.balance(),
                            has_left: n.has_left(),
                            has_right: n.has_right(),
                        })
                    })
                    .collect()
            })
            .collect();
        Self { levels }
    }
}
