/// Quick sort with Hoare partitioning around the middle element.
pub fn quick_sort<T: Ord + Clone>(arr: &mut [T]) {
    if arr.len() <= 1 {
        return;
    }
    let split = partition(arr);
    let (left, right) = arr.split_at_mut(split + 1);
    quick_sort(left);
    quick_sort(right);
}

/// Returns `j` such that every element of `arr[..=j]` is `<=` every element
/// of `arr[j + 1..]`. Always `j < arr.len() - 1`, so both halves shrink.
fn partition<T: Ord + Clone>(arr: &mut [T]) -> usize {
    let pivot = arr[(arr.len() - 1) / 2].clone();
    let mut i = 0;
    let mut j = arr.len() - 1;
    loop {
        while arr[i] < pivot {
            i += 1;
        }
        while arr[j] > pivot {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        arr.swap(i, j);
        i += 1;
        j -= 1;
    }
}
