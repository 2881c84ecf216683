//! Read-only traversals.
//!
//! All iterators borrow the tree and keep an explicit stack (or queue), so they
//! are lazy, finite, and can be restarted by asking the tree for a new one.

use std::collections::VecDeque;
use std::ops::{Bound, RangeBounds};

use crate::node::{Node, NodeRef};
use crate::record::{ItemId, Record};

/// In-order walk over the nodes whose keys fall inside a key interval.
///
/// Yields [`NodeRef`]s so callers also see depth and balance. The descent
/// skips every subtree that lies entirely below the lower bound, and the walk
/// ends at the first key past the upper bound.
pub struct Nodes<'a> {
    stack: Vec<(&'a Node, usize)>,
    end: Bound<ItemId>,
}

impl<'a> Nodes<'a> {
    pub(crate) fn new(root: Option<&'a Node>, bounds: impl RangeBounds<ItemId>) -> Self {
        let start = bounds.start_bound().cloned();
        let end = bounds.end_bound().cloned();

        let mut stack = Vec::new();
        let mut cur = root;
        let mut depth = 0;
        while let Some(node) = cur {
            let above_start = match start {
                Bound::Included(s) => node.id() >= s,
                Bound::Excluded(s) => node.id() > s,
                Bound::Unbounded => true,
            };
            if above_start {
                stack.push((node, depth));
                cur = node.left.as_deref();
            } else {
                cur = node.right.as_deref();
            }
            depth += 1;
        }

        Self { stack, end }
    }

    fn push_left_spine(&mut self, mut cur: Option<&'a Node>, mut depth: usize) {
        while let Some(node) = cur {
            self.stack.push((node, depth));
            cur = node.left.as_deref();
            depth += 1;
        }
    }

    fn below_end(&self, id: ItemId) -> bool {
        match self.end {
            Bound::Included(e) => id <= e,
            Bound::Excluded(e) => id < e,
            Bound::Unbounded => true,
        }
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if !self.below_end(node.id()) {
            self.stack.clear();
            return None;
        }
        self.push_left_spine(node.right.as_deref(), depth + 1);
        Some(NodeRef::new(node, depth))
    }
}

/// Records in ascending key order, optionally restricted to a key interval.
pub struct Range<'a> {
    inner: Nodes<'a>,
}

impl<'a> Range<'a> {
    pub(crate) fn new(root: Option<&'a Node>, bounds: impl RangeBounds<ItemId>) -> Self {
        Self {
            inner: Nodes::new(root, bounds),
        }
    }
}

impl<'a> Iterator for Range<'a> {
    type Item = &'a Record;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|n| n.record())
    }
}

/// Every record in ascending key order.
pub type Iter<'a> = Range<'a>;

/// Breadth-first walk, one level per item.
///
/// Each level lists the children of the previous level's present nodes, left
/// before right, with `None` standing in for an absent child. The walk stops
/// once a level would contain only placeholders.
pub struct Levels<'a> {
    queue: VecDeque<Option<NodeRef<'a>>>,
}

impl<'a> Levels<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = root {
            queue.push_back(Some(NodeRef::new(root, 0)));
        }
        Self { queue }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = Vec<Option<NodeRef<'a>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.queue.iter().all(Option::is_none) {
            self.queue.clear();
            return None;
        }

        let level: Vec<_> = self.queue.drain(..).collect();
        for node in level.iter().flatten() {
            self.queue.push_back(node.left());
            self.queue.push_back(node.right());
        }
        Some(level)
    }
}
