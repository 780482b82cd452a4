//! Classic algorithms for teaching: balanced search trees, comparison sorts
//! and back substitution.
//!
//! The centerpiece is [`tree`]: an AVL tree and a 2-3 tree over integer
//! keys, each supporting insertion, in-order traversal and teardown.
//!
//! ```
//! use algokit::tree::{AvlTree, TwoThreeTree};
//!
//! let keys = [10, 20, 5, 6, 15, 30, 25, 16, 8];
//! let avl: AvlTree = keys.iter().copied().collect();
//! let two_three: TwoThreeTree = keys.iter().copied().collect();
//! assert_eq!(avl.traverse(), vec![5, 6, 8, 10, 15, 16, 20, 25, 30]);
//! assert_eq!(avl.traverse(), two_three.traverse());
//! ```

#![warn(missing_docs)]

pub mod bench;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod sort;
pub mod tree;

pub use error::{AlgoError, Result};
