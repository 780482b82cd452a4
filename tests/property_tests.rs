#![allow(missing_docs)]

use std::collections::BTreeSet;

use algokit::numeric::back_substitution;
use algokit::sort::{heap_sort, is_sorted, SortAlgorithm};
use algokit::tree::{avl, two_three, AvlTree, Key, TwoThreeTree};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Insert(Key),
    Contains(Key),
    Traverse,
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (-200i64..200).prop_map(Operation::Insert),
        1 => (-200i64..200).prop_map(Operation::Contains),
        1 => Just(Operation::Traverse),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_trees_track_a_model_set(ops in prop::collection::vec(arb_operation(), 1..300)) {
        let mut model = BTreeSet::new();
        let mut avl_tree = AvlTree::new();
        let mut two_three_tree = TwoThreeTree::new();

        for op in ops {
            match op {
                Operation::Insert(key) => {
                    let fresh = model.insert(key);
                    prop_assert_eq!(avl_tree.insert(key), fresh);
                    prop_assert_eq!(two_three_tree.insert(key), fresh);
                }
                Operation::Contains(key) => {
                    prop_assert_eq!(avl_tree.contains(key), model.contains(&key));
                    prop_assert_eq!(two_three_tree.contains(key), model.contains(&key));
                }
                Operation::Traverse => {
                    let expected: Vec<Key> = model.iter().copied().collect();
                    prop_assert_eq!(avl_tree.traverse(), expected.clone());
                    prop_assert_eq!(two_three_tree.traverse(), expected);
                }
            }
        }

        prop_assert!(avl_tree.check_invariants().is_ok());
        prop_assert!(two_three_tree.check_invariants().is_ok());
        prop_assert_eq!(avl_tree.len(), model.len());
        prop_assert_eq!(two_three_tree.len(), model.len());
        prop_assert_eq!(avl_tree.destroy(), model.len());
        prop_assert!(avl_tree.is_empty());
    }

    #[test]
    fn prop_free_functions_agree_with_handles(keys in prop::collection::vec(any::<i64>(), 0..200)) {
        let mut avl_root = None;
        let mut two_three_root = None;
        for &key in &keys {
            avl_root = Some(avl::insert(avl_root, key));
            two_three_root = Some(two_three::insert(two_three_root, key));
        }
        let avl_tree: AvlTree = keys.iter().copied().collect();
        let two_three_tree: TwoThreeTree = keys.iter().copied().collect();

        prop_assert_eq!(avl::traverse(avl_root.as_deref()), avl_tree.traverse());
        prop_assert_eq!(two_three::traverse(two_three_root.as_ref()), two_three_tree.traverse());
        prop_assert_eq!(avl::destroy(avl_root), avl_tree.len());
    }

    #[test]
    fn prop_two_three_leaves_share_one_depth(keys in prop::collection::vec(0i64..10_000, 1..400)) {
        let tree: TwoThreeTree = keys.into_iter().collect();
        let depths = tree.leaf_depths();
        prop_assert!(depths.windows(2).all(|w| w[0] == w[1]));
        prop_assert_eq!(depths[0] + 1, tree.height());
    }

    #[test]
    fn prop_every_sort_matches_std(mut values in prop::collection::vec(any::<i32>(), 0..256)) {
        let mut expected = values.clone();
        expected.sort();
        for algorithm in SortAlgorithm::ALL {
            let mut copy = values.clone();
            algorithm.sort(&mut copy);
            prop_assert_eq!(&copy, &expected, "{} sort diverged", algorithm);
        }
        heap_sort(&mut values);
        prop_assert!(is_sorted(&values));
    }

    #[test]
    fn prop_back_substitution_recovers_solution(
        (diag, upper, x) in (1usize..8).prop_flat_map(|n| (
            prop::collection::vec(prop_oneof![-9i32..=-1, 1i32..=9], n),
            prop::collection::vec(-9i32..=9, n * n),
            prop::collection::vec(-9i32..=9, n),
        ))
    ) {
        let n = diag.len();
        let mut u = vec![vec![0.0; n]; n];
        for i in 0..n {
            u[i][i] = f64::from(diag[i]);
            for j in i + 1..n {
                u[i][j] = f64::from(upper[i * n + j]);
            }
        }
        let b: Vec<f64> = (0..n)
            .map(|i| (0..n).map(|j| u[i][j] * f64::from(x[j])).sum())
            .collect();

        let solved = back_substitution(&u, &b).expect("nonzero diagonal");
        for (got, want) in solved.iter().zip(&x) {
            prop_assert!((got - f64::from(*want)).abs() < 1e-6, "{:?} vs {:?}", solved, x);
        }
    }
}
