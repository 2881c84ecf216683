//! # avl-inventory
//!
//! An in-memory inventory keyed by integer id, backed by a height-balanced
//! (AVL) binary search tree.
//!
//! Point operations (`insert`, `remove`, `get`, `update`) are `O(log n)`;
//! listings and attribute filters are lazy in-order walks that yield records in
//! ascending id order.
//!
//! ## Example
//!
//! ```rust
//! use avl_inventory::{AvlTree, Record};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(Record::new(1, "apple", "food", 1.0, 2));
//! tree.insert(Record::new(2, "banana", "food", 2.0, 0));
//!
//! assert_eq!(tree.get(1).map(|r| r.name.as_str()), Some("apple"));
//! assert_eq!(tree.low_stock(1).map(|r| r.id).collect::<Vec<_>>(), vec![2]);
//! assert_eq!(tree.total_value(), 2.0);
//! ```

#![deny(unsafe_code)]

mod debug;
mod iter;
mod node;
mod record;

pub use debug::TreeStats;
pub use iter::{Iter, Levels, Nodes, Range};
pub use node::NodeRef;
pub use record::{ItemId, Record};

use std::cmp::Ordering;
use std::ops::RangeBounds;

use node::Link;

/// Ordered store of [`Record`]s keyed by [`Record::id`].
///
/// Every node's balance factor stays in `{-1, 0, 1}` between calls, so the
/// tree height is logarithmic in [`len`](Self::len).
#[derive(Clone, Default)]
pub struct AvlTree {
    root: Link,
    count: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Height of the root; 0 for an empty tree.
    #[inline]
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    /// Insert `record`, or overwrite the payload stored under its id.
    ///
    /// Returns the replaced record when the id was already present; the tree
    /// shape is unchanged in that case.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        let (root, old) = node::insert(self.root.take(), record);
        self.root = Some(root);
        if old.is_none() {
            self.count += 1;
        }
        old
    }

    /// Remove the record stored under `id` and return it.
    ///
    /// A missing id is not an error: the tree is left untouched and `None` is
    /// returned.
    pub fn remove(&mut self, id: ItemId) -> Option<Record> {
        let (root, removed) = node::remove(self.root.take(), id);
        self.root = root;
        if removed.is_some() {
            self.count -= 1;
        }
        removed
    }

    pub fn get(&self, id: ItemId) -> Option<&Record> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match id.cmp(&node.id()) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            }
        }
        None
    }

    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Replace the payload of an existing record.
    ///
    /// Returns `false`, and stores nothing, when no record has `record.id`.
    pub fn update(&mut self, record: Record) -> bool {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match record.id.cmp(&node.id()) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => {
                    node.record = record;
                    return true;
                }
            }
        }
        false
    }

    // =========================================================================
    // Traversals and queries
    // =========================================================================

    /// All records in ascending id order.
    pub fn iter(&self) -> Iter<'_> {
        Range::new(self.root.as_deref(), ..)
    }

    /// Records whose id lies in `bounds`, ascending.
    pub fn range(&self, bounds: impl RangeBounds<ItemId>) -> Range<'_> {
        Range::new(self.root.as_deref(), bounds)
    }

    /// In-order walk over node views (record, height, balance, depth).
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(self.root.as_deref(), ..)
    }

    /// Level-order walk; see [`Levels`].
    pub fn levels(&self) -> Levels<'_> {
        Levels::new(self.root.as_deref())
    }

    /// The root node, for callers that walk the structure themselves.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.as_deref().map(|n| NodeRef::new(n, 0))
    }

    /// Records whose name contains `needle` (case-sensitive).
    pub fn search_by_name<'a>(
        &'a self,
        needle: &'a str,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.iter().filter(move |r| r.name.contains(needle))
    }

    /// Records whose category equals `category` exactly.
    pub fn search_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.iter().filter(move |r| r.category == category)
    }

    /// Records with `quantity <= threshold`.
    pub fn low_stock(&self, threshold: i64) -> impl Iterator<Item = &Record> + '_ {
        self.iter().filter(move |r| r.quantity <= threshold)
    }

    /// Sum of `price * quantity` over every record.
    pub fn total_value(&self) -> f64 {
        self.iter().map(Record::value).sum()
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Record> for AvlTree {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<Record> for AvlTree {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl std::fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter().map(|r| (r.id, r))).finish()
    }
}


#[cfg(test)]
mod proptests;
