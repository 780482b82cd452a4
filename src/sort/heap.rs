use std::fmt;

use serde::Serialize;
use tracing::debug;

/// In-place heap sort: build a max-heap, then repeatedly move the maximum
/// to the end of the shrinking heap.
pub fn heap_sort<T: Ord>(arr: &mut [T]) {
    let len = arr.len();
    for i in (0..len / 2).rev() {
        sift_down(arr, len, i);
    }
    for end in (1..len).rev() {
        arr.swap(0, end);
        sift_down(arr, end, 0);
    }
}

/// Point in the sort at which a [`HeapStep`] snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum HeapPhase {
    /// The whole array has just been arranged as a max-heap.
    Built,
    /// The heap maximum was swapped into its final slot `placed` and the
    /// remaining heap was repaired.
    Extracted {
        /// Final index of the extracted maximum.
        placed: usize,
    },
}

/// Snapshot of the array-backed heap during [`heap_sort_with_steps`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeapStep<T> {
    /// What just happened.
    #[serde(flatten)]
    pub phase: HeapPhase,
    /// Number of leading elements that still form the heap.
    pub heap_len: usize,
    /// Whole array after the step; `snapshot[heap_len..]` is already sorted.
    pub snapshot: Vec<T>,
}

/// Heap sort that records the array after building the heap and after every
/// extraction. The final array equals what [`heap_sort`] produces.
pub fn heap_sort_with_steps<T: Ord + Clone + fmt::Debug>(arr: &mut [T]) -> Vec<HeapStep<T>> {
    let len = arr.len();
    let mut steps = Vec::with_capacity(len);
    if len == 0 {
        return steps;
    }

    for i in (0..len / 2).rev() {
        sift_down(arr, len, i);
    }
    record(&mut steps, HeapPhase::Built, len, arr);

    for end in (1..len).rev() {
        arr.swap(0, end);
        sift_down(arr, end, 0);
        record(&mut steps, HeapPhase::Extracted { placed: end }, end, arr);
    }
    steps
}

fn record<T: Clone + fmt::Debug>(steps: &mut Vec<HeapStep<T>>, phase: HeapPhase, heap_len: usize, arr: &[T]) {
    debug!(?phase, heap_len, snapshot = ?arr, "heap sort step");
    steps.push(HeapStep {
        phase,
        heap_len,
        snapshot: arr.to_vec(),
    });
}

fn sift_down<T: Ord>(arr: &mut [T], heap_len: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;
        if left < heap_len && arr[left] > arr[largest] {
            largest = left;
        }
        if right < heap_len && arr[right] > arr[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        arr.swap(root, largest);
        root = largest;
    }
}
