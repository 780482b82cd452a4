#![allow(missing_docs)]

use assert_cmd::cargo::cargo_bin_cmd;
use csv::ReaderBuilder;
use serde_json::Value;
use tempfile::TempDir;

fn stdout_of(args: &[&str]) -> String {
    let output = cargo_bin_cmd!("algokit")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("utf8 stdout")
}

fn json_of(args: &[&str]) -> Value {
    let mut full = vec!["--format", "json"];
    full.extend_from_slice(args);
    serde_json::from_str(&stdout_of(&full)).expect("valid json")
}

#[test]
fn demo_prints_both_traversals_and_heap_sorts() {
    let out = stdout_of(&["demo"]);
    assert!(out.contains("Inorder traversal of AVL tree: 5 6 8 10 15 16 20 25 30"));
    assert!(out.contains("Inorder traversal of 2-3 tree: 5 6 8 10 15 16 20 25 30"));
    assert!(out.contains("Heap sort on [5,4,3,2,1]: 1 2 3 4 5"));
    assert!(out.contains("Heap sort on [S,O,R,T,I,N,G]: G I N O R S T"));
}

#[test]
fn demo_json_matches_text() {
    let json = json_of(&["demo"]);
    let avl: Vec<i64> = serde_json::from_value(json["avl"].clone()).expect("avl keys");
    assert_eq!(avl, vec![5, 6, 8, 10, 15, 16, 20, 25, 30]);
    assert_eq!(json["avl"], json["two_three"]);
    assert_eq!(json["heap_letters"], "GINORST");
}

#[test]
fn tree_reports_traversal_and_rotations() {
    let json = json_of(&["tree", "--verify", "30,20,10"]);
    assert_eq!(json["kind"], "avl");
    assert_eq!(json["keys"], serde_json::json!([10, 20, 30]));
    assert_eq!(json["height"], 2);
    assert_eq!(json["stats"]["rotations_right"], 1);
    assert_eq!(json["verified"], true);
}

#[test]
fn two_three_tree_counts_duplicates_and_splits() {
    let json = json_of(&["tree", "--kind", "two-three", "--verify", "10", "20", "30", "20", "-5"]);
    assert_eq!(json["keys"], serde_json::json!([-5, 10, 20, 30]));
    assert_eq!(json["len"], 4);
    assert_eq!(json["height"], 2);
    assert_eq!(json["stats"]["duplicates"], 1);
    assert_eq!(json["stats"]["leaf_splits"], 1);
    assert_eq!(json["stats"]["root_growths"], 1);
}

#[test]
fn tree_text_output_mentions_invariants() {
    let out = stdout_of(&["tree", "--kind", "two-three", "--verify", "5,1,9"]);
    assert!(out.contains("Inorder traversal of two-three tree: 1 5 9"));
    assert!(out.contains("invariants: ok"));
}

#[test]
fn tree_requires_keys() {
    cargo_bin_cmd!("algokit").arg("tree").assert().failure();
}

#[test]
fn sort_each_algorithm() {
    for algorithm in ["merge", "quick", "heap"] {
        let out = stdout_of(&["sort", "--algorithm", algorithm, "3,-1,2,2,0"]);
        assert!(
            out.contains(&format!("{algorithm} sort: -1 0 2 2 3")),
            "unexpected output for {algorithm}: {out}"
        );
    }
}

#[test]
fn heap_sort_steps_start_with_built_heap() {
    let json = json_of(&["sort", "--steps", "4,10,3,5,1"]);
    let steps = json["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0]["phase"], "built");
    assert_eq!(steps[0]["snapshot"], serde_json::json!([10, 5, 3, 4, 1]));
    assert_eq!(json["sorted"], serde_json::json!([1, 3, 4, 5, 10]));
}

#[test]
fn steps_rejected_for_other_sorts() {
    let assert = cargo_bin_cmd!("algokit")
        .args(["sort", "--algorithm", "merge", "--steps", "2,1"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    assert!(stderr.contains("only supported for heap sort"));
}

#[test]
fn bench_writes_csv() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("results.csv");
    let path_str = path.to_str().expect("utf8 path");
    let out = stdout_of(&[
        "bench",
        "--sizes",
        "10,20",
        "--algorithms",
        "quick,heap",
        "--seed",
        "3",
        "--out",
        path_str,
    ]);
    assert!(out.contains("Results written to"));
    assert!(out.contains("(12 rows)"));

    let mut reader = ReaderBuilder::new().from_path(&path).expect("open csv");
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows");
    assert_eq!(rows.len(), 12);
    assert_eq!(&rows[0][0], "quick");
    assert_eq!(&rows[11][0], "heap");
    assert_eq!(&rows[11][1], "20");
    assert_eq!(&rows[11][2], "descending");
}

#[test]
fn backsub_defaults_solve_sample_system() {
    let out = stdout_of(&["backsub"]);
    assert!(out.contains("x[i] = (b[i] - sum) / U[i][i]"));
    assert!(out.contains("n(n-1)/2"));
    assert!(out.contains("x = 1 2 3"));
}

#[test]
fn backsub_reports_zero_pivot() {
    let assert = cargo_bin_cmd!("algokit")
        .args(["backsub", "--matrix", "1,2;0,0", "--rhs", "1,1"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    assert!(stderr.contains("zero pivot on row 1"));
}

#[test]
fn backsub_rejects_malformed_numbers() {
    cargo_bin_cmd!("algokit")
        .args(["backsub", "--matrix", "1,x;0,1", "--rhs", "1,1"])
        .assert()
        .failure();
}
