//! Owned AVL nodes and the recursive mutation primitives.
//!
//! Every primitive consumes a subtree handle and hands back the (possibly new)
//! root of that subtree, so ownership only ever moves down and back up the
//! call stack. No node is reachable from two places at once.

use std::cmp::Ordering;

use crate::record::{ItemId, Record};

pub(crate) type Link = Option<Box<Node>>;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) record: Record,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// `1 + max(height(left), height(right))`, absent children count as 0.
    pub(crate) height: u32,
}

#[inline]
pub(crate) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

impl Node {
    fn new(record: Record) -> Box<Self> {
        Box::new(Self {
            record,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    pub(crate) fn id(&self) -> ItemId {
        self.record.id
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

#[inline]
fn balance(link: &Link) -> i32 {
    link.as_ref().map_or(0, |n| n.balance())
}

// =============================================================================
// Rotations
// =============================================================================

/// Promote the left child of `y`; `y` becomes its right child.
///
/// ```text
///        y            x
///       / \          / \
///      x   C   =>   A   y
///     / \              / \
///    A   B            B   C
/// ```
fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Mirror of [`rotate_right`].
fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Rebalance an ancestor of a freshly inserted `key`. Heights must already
/// be current for `node`.
fn rebalance_after_insert(mut node: Box<Node>, key: ItemId) -> Box<Node> {
    let bf = node.balance();
    let left_id = node.left.as_ref().map(|n| n.id());
    let right_id = node.right.as_ref().map(|n| n.id());

    match (left_id, right_id) {
        // Left Left
        (Some(l), _) if bf > 1 && key < l => rotate_right(node),
        // Right Right
        (_, Some(r)) if bf < -1 && key > r => rotate_left(node),
        // Left Right
        (Some(l), _) if bf > 1 && key > l => {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        // Right Left
        (_, Some(r)) if bf < -1 && key < r => {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    }
}

/// Rebalance an ancestor of a removed node. There is no inserted key to
/// compare against, so the child's own balance picks single vs double.
fn rebalance_after_remove(mut node: Box<Node>) -> Box<Node> {
    let bf = node.balance();
    if bf > 1 {
        if balance(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if bf < -1 {
        if balance(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

// =============================================================================
// Insert / remove
// =============================================================================

/// Insert or overwrite `record` under `link`.
///
/// Returns the new subtree root and the replaced payload, if any.
pub(crate) fn insert(link: Link, record: Record) -> (Box<Node>, Option<Record>) {
    let Some(mut node) = link else {
        return (Node::new(record), None);
    };

    let key = record.id;
    match key.cmp(&node.id()) {
        Ordering::Less => {
            let (child, old) = insert(node.left.take(), record);
            node.left = Some(child);
            if old.is_some() {
                return (node, old);
            }
        }
        Ordering::Greater => {
            let (child, old) = insert(node.right.take(), record);
            node.right = Some(child);
            if old.is_some() {
                return (node, old);
            }
        }
        Ordering::Equal => {
            let old = std::mem::replace(&mut node.record, record);
            return (node, Some(old));
        }
    }

    node.update_height();
    (rebalance_after_insert(node, key), None)
}

/// Remove `id` from under `link`.
///
/// Returns the new subtree root and the removed record. When `id` is absent
/// the subtree comes back untouched.
pub(crate) fn remove(link: Link, id: ItemId) -> (Link, Option<Record>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match id.cmp(&node.id()) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), id);
            node.left = child;
            if removed.is_none() {
                return (Some(node), None);
            }
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), id);
            node.right = child;
            if removed.is_none() {
                return (Some(node), None);
            }
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, only) | (only, None) => return (only, Some(node.record)),
            (Some(left), Some(right)) => {
                let (right, successor) = remove_min(right);
                node.left = Some(left);
                node.right = right;
                Some(std::mem::replace(&mut node.record, successor))
            }
        },
    };

    node.update_height();
    (Some(rebalance_after_remove(node)), removed)
}

/// Detach the leftmost node of a non-empty subtree, rebalancing on the way up.
fn remove_min(mut node: Box<Node>) -> (Link, Record) {
    match node.left.take() {
        None => {
            let Node { record, right, .. } = *node;
            (right, record)
        }
        Some(left) => {
            let (left, min) = remove_min(left);
            node.left = left;
            node.update_height();
            (Some(rebalance_after_remove(node)), min)
        }
    }
}

// =============================================================================
// Read-only view
// =============================================================================

/// Borrowed view of one node, handed out by the structural traversals.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub(crate) fn new(node: &'a Node, depth: usize) -> Self {
        Self { node, depth }
    }

    #[inline]
    pub fn record(&self) -> &'a Record {
        &self.node.record
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.node.id()
    }

    /// Stored height of the subtree rooted here (a leaf has height 1).
    #[inline]
    pub fn height(&self) -> u32 {
        self.node.height
    }

    /// `height(left) - height(right)`, recomputed from the children.
    #[inline]
    pub fn balance(&self) -> i32 {
        self.node.balance()
    }

    /// Distance from the root; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.node
            .left
            .as_deref()
            .map(|n| NodeRef::new(n, self.depth + 1))
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.node
            .right
            .as_deref()
            .map(|n| NodeRef::new(n, self.depth + 1))
    }

    #[inline]
    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    #[inline]
    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("height", &self.height())
            .field("balance", &self.balance())
            .field("depth", &self.depth)
            .finish()
    }
}
