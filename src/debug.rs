//! Structural diagnostics.
//!
//! Everything here is recomputed from the node graph on each call and never
//! cached, so it doubles as an independent check of the engine's bookkeeping.

use crate::node::{self, Link};
use crate::record::ItemId;
use crate::AvlTree;

/// Shape metrics of an [`AvlTree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStats {
    /// Nodes reached by traversal (not the cached counter).
    pub count: usize,
    pub height: u32,
    /// Nodes whose balance factor lies in `{-1, 0, 1}`.
    pub well_balanced_nodes: usize,
    /// `well_balanced_nodes` as a percentage of `count`; 100 when empty.
    pub balance_quality: f64,
    /// Mean depth with the root at depth 0; 0 when empty.
    pub avg_depth: f64,
    /// Mean absolute balance factor; 0 when empty.
    pub avg_abs_balance: f64,
}

impl TreeStats {
    /// `true` when every node is within the AVL bound.
    pub fn is_avl(&self) -> bool {
        self.well_balanced_nodes == self.count
    }
}

impl AvlTree {
    /// Walk every node and summarize the tree's shape.
    pub fn stats(&self) -> TreeStats {
        let mut count = 0usize;
        let mut well_balanced = 0usize;
        let mut depth_sum = 0usize;
        let mut abs_balance_sum = 0u64;

        for n in self.nodes() {
            count += 1;
            let bf = n.balance();
            if bf.abs() <= 1 {
                well_balanced += 1;
            }
            depth_sum += n.depth();
            abs_balance_sum += u64::from(bf.unsigned_abs());
        }

        let (balance_quality, avg_depth, avg_abs_balance) = if count == 0 {
            (100.0, 0.0, 0.0)
        } else {
            let c = count as f64;
            (
                well_balanced as f64 * 100.0 / c,
                depth_sum as f64 / c,
                abs_balance_sum as f64 / c,
            )
        };

        TreeStats {
            count,
            height: self.height(),
            well_balanced_nodes: well_balanced,
            balance_quality,
            avg_depth,
            avg_abs_balance,
        }
    }

    /// Check every structural invariant and describe each violation found.
    ///
    /// Checks key ordering against the bounds inherited from ancestors, that
    /// stored heights match the children, that balance factors are within
    /// `{-1, 0, 1}`, and that the cached length matches the node count.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let reached = verify_node(&self.root, None, None, &mut issues);
        if reached != self.count {
            issues.push(format!(
                "len() reports {} but {} nodes are reachable",
                self.count, reached
            ));
        }
        issues
    }
}

fn verify_node(
    link: &Link,
    lower: Option<ItemId>,
    upper: Option<ItemId>,
    issues: &mut Vec<String>,
) -> usize {
    let Some(n) = link else {
        return 0;
    };
    let id = n.id();

    if lower.is_some_and(|lo| id <= lo) || upper.is_some_and(|hi| id >= hi) {
        issues.push(format!(
            "key {id} outside its subtree bounds ({lower:?}, {upper:?})"
        ));
    }

    let expected = 1 + node::height(&n.left).max(node::height(&n.right));
    if n.height != expected {
        issues.push(format!(
            "node {id} stores height {} but children give {expected}",
            n.height
        ));
    }

    let bf = n.balance();
    if !(-1..=1).contains(&bf) {
        issues.push(format!("node {id} has balance factor {bf}"));
    }

    1 + verify_node(&n.left, lower, Some(id), issues) + verify_node(&n.right, Some(id), upper, issues)
}
