//! Height-balanced binary search tree over integer keys.
//!
//! Every node caches the height of its subtree. Insertion descends like a
//! plain binary search tree and repairs balance on the way back up with at
//! most one single or double rotation. Each operation hands back ownership
//! of the (possibly new) subtree root, so there are no parent pointers.

use std::cmp::Ordering;

use tracing::trace;

use super::stats::TreeStats;
use super::Key;
use crate::error::{AlgoError, Result};

/// Owned link to a subtree; `None` is the empty tree.
pub type Link = Option<Box<AvlNode>>;

/// A node of an AVL tree. The node exclusively owns both subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlNode {
    key: Key,
    height: i32,
    left: Link,
    right: Link,
}

impl AvlNode {
    /// Creates a leaf holding `key` with height 1.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Key stored in this node.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Cached height of the subtree rooted here.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Left subtree, holding keys smaller than [`AvlNode::key`].
    pub fn left(&self) -> Option<&AvlNode> {
        self.left.as_deref()
    }

    /// Right subtree, holding keys greater than [`AvlNode::key`].
    pub fn right(&self) -> Option<&AvlNode> {
        self.right.as_deref()
    }

    fn update_height(&mut self) {
        self.height = 1 + height(self.left()).max(height(self.right()));
    }
}

/// Height of `node`, or 0 for the empty tree.
pub fn height(node: Option<&AvlNode>) -> i32 {
    node.map_or(0, |n| n.height)
}

/// `height(left) - height(right)`, or 0 for the empty tree.
pub fn balance_factor(node: Option<&AvlNode>) -> i32 {
    node.map_or(0, |n| height(n.left()) - height(n.right()))
}

/// Rotates the subtree right around `node` and returns the new subtree root.
///
/// The left child becomes the root, and its right subtree moves over to
/// become the left subtree of `node`.
///
/// # Panics
///
/// Panics if `node` has no left child.
pub fn rotate_right(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut pivot) = node.left.take() else {
        panic!("rotate_right requires a left child (key {})", node.key);
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Rotates the subtree left around `node` and returns the new subtree root.
///
/// # Panics
///
/// Panics if `node` has no right child.
pub fn rotate_left(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut pivot) = node.right.take() else {
        panic!("rotate_left requires a right child (key {})", node.key);
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Inserts `key` below `root` and returns the root of the rebalanced tree.
///
/// Inserting a key that is already present returns the tree unchanged.
pub fn insert(root: Link, key: Key) -> Box<AvlNode> {
    insert_node(root, key, &mut TreeStats::default())
}

fn insert_node(link: Link, key: Key, stats: &mut TreeStats) -> Box<AvlNode> {
    let Some(mut node) = link else {
        stats.inc_inserts();
        return Box::new(AvlNode::new(key));
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, stats)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), key, stats)),
        Ordering::Equal => {
            stats.inc_duplicates();
            return node;
        }
    }

    node.update_height();
    rebalance(node, key, stats)
}

// A single insertion moves a balance factor by at most one step past the
// allowed range, so at most one of the four cases applies per node.
fn rebalance(mut node: Box<AvlNode>, key: Key, stats: &mut TreeStats) -> Box<AvlNode> {
    let balance = balance_factor(Some(&node));

    if balance > 1 {
        if node.left.as_ref().is_some_and(|left| key > left.key) {
            trace!(node = node.key, key, "left-right case");
            node.left = node.left.take().map(|left| {
                stats.inc_rotations_left();
                rotate_left(left)
            });
        } else {
            trace!(node = node.key, key, "left-left case");
        }
        stats.inc_rotations_right();
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_ref().is_some_and(|right| key < right.key) {
            trace!(node = node.key, key, "right-left case");
            node.right = node.right.take().map(|right| {
                stats.inc_rotations_right();
                rotate_right(right)
            });
        } else {
            trace!(node = node.key, key, "right-right case");
        }
        stats.inc_rotations_left();
        return rotate_left(node);
    }

    node
}

/// Keys of the tree in ascending order.
pub fn traverse(root: Option<&AvlNode>) -> Vec<Key> {
    let mut keys = Vec::new();
    visit_inorder(root, &mut |key| keys.push(key));
    keys
}

fn visit_inorder<F: FnMut(Key)>(node: Option<&AvlNode>, f: &mut F) {
    if let Some(node) = node {
        visit_inorder(node.left(), f);
        f(node.key);
        visit_inorder(node.right(), f);
    }
}

/// Releases every node of the tree, children before their parent, and
/// returns how many nodes were released.
pub fn destroy(root: Link) -> usize {
    let Some(mut node) = root else {
        return 0;
    };
    let released = destroy(node.left.take()) + destroy(node.right.take());
    drop(node);
    released + 1
}

/// Tree handle owning the root of an AVL tree.
#[derive(Debug, Default, Clone)]
pub struct AvlTree {
    root: Link,
    len: usize,
    stats: TreeStats,
}

impl AvlTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, returning `false` when it was already present.
    pub fn insert(&mut self, key: Key) -> bool {
        let before = self.stats.inserts;
        self.root = Some(insert_node(self.root.take(), key, &mut self.stats));
        let inserted = self.stats.inserts != before;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns `true` if `key` is stored in the tree.
    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> i32 {
        height(self.root())
    }

    /// Root node, if any.
    pub fn root(&self) -> Option<&AvlNode> {
        self.root.as_deref()
    }

    /// Keys in ascending order.
    pub fn traverse(&self) -> Vec<Key> {
        traverse(self.root())
    }

    /// Structural event counters accumulated since the tree was created.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Walks the whole tree and verifies ordering, cached heights, the
    /// balance bound and the stored length.
    pub fn check_invariants(&self) -> Result<()> {
        let (_, count) = validate(self.root(), None, None)?;
        if count != self.len {
            return Err(AlgoError::InvariantViolation(format!(
                "tree holds {count} nodes but length is {}",
                self.len
            )));
        }
        Ok(())
    }

    /// Releases all nodes and returns how many were released. Calling it on
    /// an empty tree is a no-op returning 0.
    pub fn destroy(&mut self) -> usize {
        let released = destroy(self.root.take());
        self.len = 0;
        trace!(released, "avl tree destroyed");
        released
    }
}

impl Extend<Key> for AvlTree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for AvlTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Returns `(height, node_count)` of a valid subtree whose keys must lie
/// strictly between `lower` and `upper`.
fn validate(node: Option<&AvlNode>, lower: Option<Key>, upper: Option<Key>) -> Result<(i32, usize)> {
    let Some(node) = node else {
        return Ok((0, 0));
    };
    if lower.is_some_and(|lo| node.key <= lo) || upper.is_some_and(|hi| node.key >= hi) {
        return Err(AlgoError::InvariantViolation(format!(
            "key {} out of order (bounds {lower:?}..{upper:?})",
            node.key
        )));
    }

    let (left_height, left_count) = validate(node.left(), lower, Some(node.key))?;
    let (right_height, right_count) = validate(node.right(), Some(node.key), upper)?;

    let expected = 1 + left_height.max(right_height);
    if node.height != expected {
        return Err(AlgoError::InvariantViolation(format!(
            "key {} caches height {} but subtree height is {expected}",
            node.key, node.height
        )));
    }
    let balance = left_height - right_height;
    if !(-1..=1).contains(&balance) {
        return Err(AlgoError::InvariantViolation(format!(
            "key {} has balance factor {balance}",
            node.key
        )));
    }
    Ok((expected, left_count + right_count + 1))
}
