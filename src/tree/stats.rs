//! Counters for structural events during insertion.

use serde::Serialize;

/// Structural event counters collected by a tree handle.
///
/// Counters only ever grow; they are reset by building a new tree.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Keys that were new and got linked into the tree.
    pub inserts: u64,
    /// Keys that were already present and were dropped.
    pub duplicates: u64,
    /// Single left rotations, including the first half of a right-left case.
    pub rotations_left: u64,
    /// Single right rotations, including the first half of a left-right case.
    pub rotations_right: u64,
    /// Number of leaf splits performed
    pub leaf_splits: u64,
    /// Number of internal node splits performed
    pub internal_splits: u64,
    /// Number of times a split escaped the root and added a level.
    pub root_growths: u64,
}

impl TreeStats {
    /// Total number of single rotations.
    pub fn rotations(&self) -> u64 {
        self.rotations_left + self.rotations_right
    }

    /// Total number of node splits.
    pub fn splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    pub(crate) fn inc_inserts(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn inc_duplicates(&mut self) {
        self.duplicates += 1;
    }

    pub(crate) fn inc_rotations_left(&mut self) {
        self.rotations_left += 1;
    }

    pub(crate) fn inc_rotations_right(&mut self) {
        self.rotations_right += 1;
    }

    pub(crate) fn inc_leaf_splits(&mut self) {
        self.leaf_splits += 1;
    }

    pub(crate) fn inc_internal_splits(&mut self) {
        self.internal_splits += 1;
    }

    pub(crate) fn inc_root_growths(&mut self) {
        self.root_growths += 1;
    }

    /// Emits current statistics to the tracing infrastructure.
    pub fn emit_tracing(&self, tree: &'static str) {
        tracing::info!(
            target: "algokit::tree::stats",
            tree,
            inserts = self.inserts,
            duplicates = self.duplicates,
            rotations_left = self.rotations_left,
            rotations_right = self.rotations_right,
            leaf_splits = self.leaf_splits,
            internal_splits = self.internal_splits,
            root_growths = self.root_growths,
            "tree stats snapshot"
        );
    }
}
