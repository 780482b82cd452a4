//! Comparison sorts: merge, quick and heap sort.
//!
//! All sorts work in place on a slice and are generic over the element type,
//! so the same routines sort integers and characters.

mod heap;
mod merge;
mod quick;

use std::fmt;

use serde::Serialize;

pub use heap::{heap_sort, heap_sort_with_steps, HeapPhase, HeapStep};
pub use merge::merge_sort;
pub use quick::quick_sort;

/// Selects one of the sorting routines at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    /// Top-down merge sort.
    Merge,
    /// Quick sort with a middle pivot.
    Quick,
    /// In-place heap sort.
    Heap,
}

impl SortAlgorithm {
    /// Every algorithm, in benchmark order.
    pub const ALL: [SortAlgorithm; 3] = [SortAlgorithm::Merge, SortAlgorithm::Quick, SortAlgorithm::Heap];

    /// Sorts `arr` ascending with the selected algorithm.
    pub fn sort<T: Ord + Clone>(self, arr: &mut [T]) {
        match self {
            SortAlgorithm::Merge => merge_sort(arr),
            SortAlgorithm::Quick => quick_sort(arr),
            SortAlgorithm::Heap => heap_sort(arr),
        }
    }

    /// Short lowercase name, as written to benchmark output.
    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Heap => "heap",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` if `arr` is in non-decreasing order.
pub fn is_sorted<T: Ord>(arr: &[T]) -> bool {
    arr.windows(2).all(|w| w[0] <= w[1])
}
