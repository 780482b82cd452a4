/// Stable top-down merge sort using one scratch buffer for the whole run.
pub fn merge_sort<T: Ord + Clone>(arr: &mut [T]) {
    if arr.len() <= 1 {
        return;
    }
    let mut scratch = arr.to_vec();
    sort_run(arr, &mut scratch);
}

fn sort_run<T: Ord + Clone>(arr: &mut [T], scratch: &mut [T]) {
    let len = arr.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    sort_run(&mut arr[..mid], &mut scratch[..mid]);
    sort_run(&mut arr[mid..], &mut scratch[mid..]);
    merge(arr, mid, scratch);
}

// Merges the sorted halves `arr[..mid]` and `arr[mid..]`. Ties take the left
// element first.
fn merge<T: Ord + Clone>(arr: &mut [T], mid: usize, scratch: &mut [T]) {
    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < arr.len() {
        if arr[i] <= arr[j] {
            scratch[k] = arr[i].clone();
            i += 1;
        } else {
            scratch[k] = arr[j].clone();
            j += 1;
        }
        k += 1;
    }
    let left_rest = mid - i;
    scratch[k..k + left_rest].clone_from_slice(&arr[i..mid]);
    k += left_rest;
    scratch[k..].clone_from_slice(&arr[j..]);
    arr.clone_from_slice(scratch);
}
