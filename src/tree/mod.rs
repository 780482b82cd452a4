//! Balanced search trees over integer keys.

pub mod avl;
pub mod stats;
pub mod two_three;

pub use avl::{AvlNode, AvlTree};
pub use stats::TreeStats;
pub use two_three::{Node, TwoThreeTree};

/// Key type stored by both trees.
pub type Key = i64;
