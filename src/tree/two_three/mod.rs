//! 2-3 search tree over integer keys.
//!
//! Nodes hold one or two keys. Insertion always lands in a leaf; a node that
//! would end up with three keys splits in two and pushes its median key up to
//! the parent. The tree only grows taller when a split escapes the root, so
//! every leaf stays at the same depth.

use std::cmp::Ordering;

use tracing::trace;

use super::stats::TreeStats;
use super::Key;
use crate::error::{AlgoError, Result};

/// A 2-3 tree node.
///
/// `children == None` marks a leaf. An internal node always has exactly one
/// more child than it has keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// One key, and either no children or two.
    Two {
        /// Separator key.
        key: Key,
        /// Subtrees below and above `key`.
        children: Option<Box<[Node; 2]>>,
    },
    /// Two strictly increasing keys, and either no children or three.
    Three {
        /// Separator keys, `keys[0] < keys[1]`.
        keys: [Key; 2],
        /// Subtrees below, between and above the keys.
        children: Option<Box<[Node; 3]>>,
    },
}

impl Node {
    /// Creates a single-key leaf.
    pub fn leaf(key: Key) -> Self {
        Node::Two {
            key,
            children: None,
        }
    }

    fn two(key: Key, left: Node, right: Node) -> Self {
        Node::Two {
            key,
            children: Some(Box::new([left, right])),
        }
    }

    fn three(keys: [Key; 2], left: Node, middle: Node, right: Node) -> Self {
        Node::Three {
            keys,
            children: Some(Box::new([left, middle, right])),
        }
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        match self {
            Node::Two { children, .. } => children.is_none(),
            Node::Three { children, .. } => children.is_none(),
        }
    }

    /// Keys held by this node, in ascending order.
    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Two { key, .. } => std::slice::from_ref(key),
            Node::Three { keys, .. } => keys,
        }
    }

    /// Children of this node; empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Two {
                children: Some(children),
                ..
            } => &children[..],
            Node::Three {
                children: Some(children),
                ..
            } => &children[..],
            _ => &[],
        }
    }
}

/// Outcome of inserting into a subtree.
enum Insertion {
    /// The subtree took the key (or already held it) without overflowing.
    Fit(Node),
    /// The subtree overflowed: `left` replaces it and `promoted` plus the new
    /// sibling `right` must be linked into the parent.
    Split {
        left: Node,
        promoted: Key,
        right: Node,
    },
}

/// Inserts `key` into the tree rooted at `root` and returns the new root.
///
/// Inserting a key that is already present returns the tree unchanged.
pub fn insert(root: Option<Node>, key: Key) -> Node {
    insert_root(root, key, &mut TreeStats::default())
}

fn insert_root(root: Option<Node>, key: Key, stats: &mut TreeStats) -> Node {
    let Some(root) = root else {
        stats.inc_inserts();
        return Node::leaf(key);
    };
    match insert_into(root, key, stats) {
        Insertion::Fit(node) => node,
        Insertion::Split {
            left,
            promoted,
            right,
        } => {
            stats.inc_root_growths();
            trace!(promoted, "root split, tree grows one level");
            Node::two(promoted, left, right)
        }
    }
}

fn insert_into(node: Node, key: Key, stats: &mut TreeStats) -> Insertion {
    match node {
        Node::Two {
            key: k,
            children: None,
        } => {
            let keys = match key.cmp(&k) {
                Ordering::Less => [key, k],
                Ordering::Greater => [k, key],
                Ordering::Equal => {
                    stats.inc_duplicates();
                    return Insertion::Fit(Node::leaf(k));
                }
            };
            stats.inc_inserts();
            Insertion::Fit(Node::Three {
                keys,
                children: None,
            })
        }
        Node::Three {
            keys: [k0, k1],
            children: None,
        } => {
            if key == k0 || key == k1 {
                stats.inc_duplicates();
                return Insertion::Fit(Node::Three {
                    keys: [k0, k1],
                    children: None,
                });
            }
            stats.inc_inserts();
            let overflow = if key < k0 {
                [key, k0, k1]
            } else if key < k1 {
                [k0, key, k1]
            } else {
                [k0, k1, key]
            };
            split_leaf(overflow, stats)
        }
        Node::Two {
            key: k,
            children: Some(children),
        } => {
            let [left, right] = *children;
            match key.cmp(&k) {
                Ordering::Equal => {
                    stats.inc_duplicates();
                    Insertion::Fit(Node::two(k, left, right))
                }
                Ordering::Less => match insert_into(left, key, stats) {
                    Insertion::Fit(left) => Insertion::Fit(Node::two(k, left, right)),
                    Insertion::Split {
                        left: a,
                        promoted,
                        right: b,
                    } => Insertion::Fit(Node::three([promoted, k], a, b, right)),
                },
                Ordering::Greater => match insert_into(right, key, stats) {
                    Insertion::Fit(right) => Insertion::Fit(Node::two(k, left, right)),
                    Insertion::Split {
                        left: a,
                        promoted,
                        right: b,
                    } => Insertion::Fit(Node::three([k, promoted], left, a, b)),
                },
            }
        }
        Node::Three {
            keys: [k0, k1],
            children: Some(children),
        } => {
            let [c0, c1, c2] = *children;
            if key == k0 || key == k1 {
                stats.inc_duplicates();
                return Insertion::Fit(Node::three([k0, k1], c0, c1, c2));
            }
            if key < k0 {
                match insert_into(c0, key, stats) {
                    Insertion::Fit(c0) => Insertion::Fit(Node::three([k0, k1], c0, c1, c2)),
                    Insertion::Split {
                        left: a,
                        promoted,
                        right: b,
                    } => split_internal([promoted, k0, k1], [a, b, c1, c2], stats),
                }
            } else if key < k1 {
                match insert_into(c1, key, stats) {
                    Insertion::Fit(c1) => Insertion::Fit(Node::three([k0, k1], c0, c1, c2)),
                    Insertion::Split {
                        left: a,
                        promoted,
                        right: b,
                    } => split_internal([k0, promoted, k1], [c0, a, b, c2], stats),
                }
            } else {
                match insert_into(c2, key, stats) {
                    Insertion::Fit(c2) => Insertion::Fit(Node::three([k0, k1], c0, c1, c2)),
                    Insertion::Split {
                        left: a,
                        promoted,
                        right: b,
                    } => split_internal([k0, k1, promoted], [c0, c1, a, b], stats),
                }
            }
        }
    }
}

fn split_leaf(keys: [Key; 3], stats: &mut TreeStats) -> Insertion {
    let [low, median, high] = keys;
    stats.inc_leaf_splits();
    trace!(low, median, high, "leaf split");
    Insertion::Split {
        left: Node::leaf(low),
        promoted: median,
        right: Node::leaf(high),
    }
}

// The left half keeps the smallest key and first two children; the new right
// sibling takes the largest key and last two children.
fn split_internal(keys: [Key; 3], children: [Node; 4], stats: &mut TreeStats) -> Insertion {
    let [low, median, high] = keys;
    let [c0, c1, c2, c3] = children;
    stats.inc_internal_splits();
    trace!(low, median, high, "internal split");
    Insertion::Split {
        left: Node::two(low, c0, c1),
        promoted: median,
        right: Node::two(high, c2, c3),
    }
}

/// Keys of the tree in ascending order.
pub fn traverse(root: Option<&Node>) -> Vec<Key> {
    let mut keys = Vec::new();
    if let Some(root) = root {
        visit_inorder(root, &mut |key| keys.push(key));
    }
    keys
}

fn visit_inorder<F: FnMut(Key)>(node: &Node, f: &mut F) {
    match node {
        Node::Two {
            key,
            children: None,
        } => f(*key),
        Node::Two {
            key,
            children: Some(children),
        } => {
            visit_inorder(&children[0], f);
            f(*key);
            visit_inorder(&children[1], f);
        }
        Node::Three {
            keys,
            children: None,
        } => {
            f(keys[0]);
            f(keys[1]);
        }
        Node::Three {
            keys,
            children: Some(children),
        } => {
            visit_inorder(&children[0], f);
            f(keys[0]);
            visit_inorder(&children[1], f);
            f(keys[1]);
            visit_inorder(&children[2], f);
        }
    }
}

/// Releases every node of the tree, children before their parent, and
/// returns how many nodes were released.
pub fn destroy(root: Option<Node>) -> usize {
    root.map_or(0, release)
}

fn release(node: Node) -> usize {
    let released = match node {
        Node::Two {
            children: Some(children),
            ..
        } => {
            let [left, right] = *children;
            release(left) + release(right)
        }
        Node::Three {
            children: Some(children),
            ..
        } => {
            let [left, middle, right] = *children;
            release(left) + release(middle) + release(right)
        }
        _ => 0,
    };
    released + 1
}

/// Tree handle owning the root of a 2-3 tree.
#[derive(Debug, Default, Clone)]
pub struct TwoThreeTree {
    root: Option<Node>,
    len: usize,
    stats: TreeStats,
}

impl TwoThreeTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, returning `false` when it was already present.
    pub fn insert(&mut self, key: Key) -> bool {
        let before = self.stats.inserts;
        self.root = Some(insert_root(self.root.take(), key, &mut self.stats));
        let inserted = self.stats.inserts != before;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns `true` if `key` is stored in the tree.
    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            let keys = node.keys();
            if keys.contains(&key) {
                return true;
            }
            let slot = keys.iter().take_while(|k| **k < key).count();
            current = node.children().get(slot);
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

    /// Number of levels; 0 when empty, 1 for a lone leaf.
    pub fn height(&self) -> usize {
        let mut levels = 0;
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            levels += 1;
            current = node.children().first();
        }
        levels
    }

    /// Root node, if any.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Keys in ascending order.
    pub fn traverse(&self) -> Vec<Key> {
        traverse(self.root())
    }

    /// Depth of every leaf, left to right, counting the root as depth 0.
    pub fn leaf_depths(&self) -> Vec<usize> {
        fn collect(node: &Node, depth: usize, out: &mut Vec<usize>) {
            if node.is_leaf() {
                out.push(depth);
            }
            for child in node.children() {
                collect(child, depth + 1, out);
            }
        }
        let mut depths = Vec::new();
        if let Some(root) = self.root() {
            collect(root, 0, &mut depths);
        }
        depths
    }

    /// Structural event counters accumulated since the tree was created.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Walks the whole tree and verifies key ordering, equal leaf depth and
    /// the stored length.
    pub fn check_invariants(&self) -> Result<()> {
        let count = match self.root() {
            Some(root) => validate(root, None, None)?.1,
            None => 0,
        };
        if count != self.len {
            return Err(AlgoError::InvariantViolation(format!(
                "tree holds {count} keys but length is {}",
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
        trace!(released, "2-3 tree destroyed");
        released
    }
}

impl Extend<Key> for TwoThreeTree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for TwoThreeTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Returns `(leaf_depth_below, key_count)` for a valid subtree whose keys
/// must lie strictly between `lower` and `upper`.
fn validate(node: &Node, lower: Option<Key>, upper: Option<Key>) -> Result<(usize, usize)> {
    let keys = node.keys();
    let mut bounds = Vec::with_capacity(keys.len() + 2);
    bounds.push(lower);
    bounds.extend(keys.iter().copied().map(Some));
    bounds.push(upper);
    for pair in bounds.windows(2) {
        if let [Some(a), Some(b)] = pair {
            if a >= b {
                return Err(AlgoError::InvariantViolation(format!(
                    "keys {keys:?} out of order (bounds {lower:?}..{upper:?})"
                )));
            }
        }
    }

    let children = node.children();
    if children.is_empty() {
        return Ok((0, keys.len()));
    }

    let mut depth = None;
    let mut count = keys.len();
    for (idx, child) in children.iter().enumerate() {
        let (child_depth, child_count) = validate(child, bounds[idx], bounds[idx + 1])?;
        match depth {
            None => depth = Some(child_depth),
            Some(d) if d != child_depth => {
                return Err(AlgoError::InvariantViolation(format!(
                    "children of {keys:?} reach leaves at depths {d} and {child_depth}"
                )));
            }
            Some(_) => {}
        }
        count += child_count;
    }
    Ok((depth.unwrap_or(0) + 1, count))
}
