//! Binary entry point for the algokit demo and benchmark CLI.
#![forbid(unsafe_code)]

use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;

use algokit::{
    bench::{run_suite_to_path, BenchConfig, BenchRecord, Distribution},
    logging::init_logging,
    numeric::{back_substitution, BACK_SUBSTITUTION_COMPLEXITY, BACK_SUBSTITUTION_PSEUDOCODE},
    sort::{heap_sort, heap_sort_with_steps, HeapPhase, HeapStep, SortAlgorithm},
    tree::{AvlTree, Key, TreeStats, TwoThreeTree},
    AlgoError,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

const DEMO_VALUES: [Key; 9] = [10, 20, 5, 6, 15, 30, 25, 16, 8];

#[derive(Parser, Debug)]
#[command(
    name = "algokit",
    version,
    about = "Balanced search trees, comparison sorts and back substitution",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "ALGOKIT_LOG",
        default_value = "warn",
        help = "Tracing filter directive (e.g. info, algokit::tree=trace)"
    )]
    log_level: String,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Build both trees from the demo values and run the heap sort demos")]
    Demo,

    #[command(about = "Build a tree from the given keys and print its in-order traversal")]
    Tree(TreeCmd),

    #[command(about = "Sort the given values")]
    Sort(SortCmd),

    #[command(about = "Time the sorts on generated inputs and write a CSV report")]
    Bench(BenchCmd),

    #[command(about = "Solve an upper-triangular system by back substitution")]
    Backsub(BacksubCmd),
}

#[derive(Args, Debug)]
struct TreeCmd {
    #[arg(long, value_enum, default_value_t = TreeKind::Avl, help = "Tree to build")]
    kind: TreeKind,

    #[arg(long, help = "Check structural invariants after building")]
    verify: bool,

    #[arg(
        value_name = "KEY",
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true,
        help = "Keys to insert, in order"
    )]
    keys: Vec<Key>,
}

#[derive(Args, Debug)]
struct SortCmd {
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Heap, help = "Sorting algorithm")]
    algorithm: AlgorithmArg,

    #[arg(long, help = "Print the heap after every step (heap sort only)")]
    steps: bool,

    #[arg(
        value_name = "VALUE",
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    values: Vec<Key>,
}

#[derive(Args, Debug)]
struct BenchCmd {
    #[arg(long, value_name = "FILE", default_value = "results.csv", help = "Output CSV")]
    out: PathBuf,

    #[arg(
        long,
        value_name = "N,N",
        value_delimiter = ',',
        help = "Input sizes (default 100..1000000 in powers of ten)"
    )]
    sizes: Vec<usize>,

    #[arg(long, value_enum, value_delimiter = ',', help = "Algorithms to time (default all)")]
    algorithms: Vec<AlgorithmArg>,

    #[arg(long, value_enum, value_delimiter = ',', help = "Input shapes (default all)")]
    distributions: Vec<DistributionArg>,

    #[arg(long, help = "Seed for random inputs")]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct BacksubCmd {
    #[arg(
        long,
        value_name = "ROWS",
        default_value = "2,1,-1;0,3,2;0,0,4",
        allow_hyphen_values = true,
        help = "Upper-triangular matrix, rows separated by ';', entries by ','"
    )]
    matrix: String,

    #[arg(
        long,
        value_name = "VALUES",
        default_value = "1,12,12",
        allow_hyphen_values = true,
        help = "Right-hand side, entries separated by ','"
    )]
    rhs: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum TreeKind {
    Avl,
    #[value(name = "two-three")]
    TwoThree,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum AlgorithmArg {
    Merge,
    Quick,
    Heap,
}

impl From<AlgorithmArg> for SortAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Merge => SortAlgorithm::Merge,
            AlgorithmArg::Quick => SortAlgorithm::Quick,
            AlgorithmArg::Heap => SortAlgorithm::Heap,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum DistributionArg {
    Random,
    Ascending,
    Descending,
}

impl From<DistributionArg> for Distribution {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Random => Distribution::Random,
            DistributionArg::Ascending => Distribution::Ascending,
            DistributionArg::Descending => Distribution::Descending,
        }
    }
}

#[derive(Serialize)]
struct DemoReport {
    avl: Vec<Key>,
    two_three: Vec<Key>,
    heap_ascending: Vec<Key>,
    heap_descending: Vec<Key>,
    heap_letters: String,
}

#[derive(Serialize)]
struct TreeReport {
    kind: &'static str,
    keys: Vec<Key>,
    len: usize,
    height: usize,
    stats: TreeStats,
    verified: Option<bool>,
    violation: Option<String>,
}

#[derive(Serialize)]
struct SortReport {
    algorithm: SortAlgorithm,
    sorted: Vec<Key>,
    steps: Option<Vec<HeapStep<Key>>>,
}

#[derive(Serialize)]
struct BenchReport {
    out: String,
    records: Vec<BenchRecord>,
}

#[derive(Serialize)]
struct BacksubReport {
    solution: Vec<f64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Demo => {
            let report = run_demo();
            emit(cli.format, &report, || print_demo_text(&report))?;
        }
        Command::Tree(cmd) => {
            let report = build_tree(&cmd);
            emit(cli.format, &report, || print_tree_text(&report))?;
            if report.verified == Some(false) {
                std::process::exit(2);
            }
        }
        Command::Sort(cmd) => {
            let report = run_sort(cmd)?;
            emit(cli.format, &report, || print_sort_text(&report))?;
        }
        Command::Bench(cmd) => {
            let config = build_bench_config(&cmd);
            let records = run_suite_to_path(&config, &cmd.out)?;
            let report = BenchReport {
                out: cmd.out.display().to_string(),
                records,
            };
            emit(cli.format, &report, || {
                println!(
                    "Results written to {} ({} rows)",
                    report.out,
                    report.records.len()
                )
            })?;
        }
        Command::Backsub(cmd) => {
            let matrix = parse_matrix(&cmd.matrix)?;
            let rhs = parse_row(&cmd.rhs)?;
            let solution = back_substitution(&matrix, &rhs)?;
            let report = BacksubReport { solution };
            emit(cli.format, &report, || print_backsub_text(&report))?;
        }
    }
    Ok(())
}

fn run_demo() -> DemoReport {
    let mut avl: AvlTree = DEMO_VALUES.iter().copied().collect();
    let mut two_three: TwoThreeTree = DEMO_VALUES.iter().copied().collect();
    let report_avl = avl.traverse();
    let report_two_three = two_three.traverse();
    avl.stats().emit_tracing("avl");
    two_three.stats().emit_tracing("two-three");
    avl.destroy();
    two_three.destroy();

    let mut ascending: Vec<Key> = vec![1, 2, 3, 4, 5];
    let mut descending: Vec<Key> = vec![5, 4, 3, 2, 1];
    let mut letters: Vec<char> = "SORTING".chars().collect();
    heap_sort(&mut ascending);
    heap_sort(&mut descending);
    heap_sort(&mut letters);

    DemoReport {
        avl: report_avl,
        two_three: report_two_three,
        heap_ascending: ascending,
        heap_descending: descending,
        heap_letters: letters.into_iter().collect(),
    }
}

fn build_tree(cmd: &TreeCmd) -> TreeReport {
    let keys = cmd.keys.iter().copied();
    let (kind, traversal, len, height, stats, check) = match cmd.kind {
        TreeKind::Avl => {
            let mut tree: AvlTree = keys.collect();
            let check = cmd.verify.then(|| tree.check_invariants());
            let height = usize::try_from(tree.height()).unwrap_or_default();
            let summary = (tree.traverse(), tree.len(), height, *tree.stats());
            tree.stats().emit_tracing("avl");
            tree.destroy();
            ("avl", summary.0, summary.1, summary.2, summary.3, check)
        }
        TreeKind::TwoThree => {
            let mut tree: TwoThreeTree = keys.collect();
            let check = cmd.verify.then(|| tree.check_invariants());
            let summary = (tree.traverse(), tree.len(), tree.height(), *tree.stats());
            tree.stats().emit_tracing("two-three");
            tree.destroy();
            ("two-three", summary.0, summary.1, summary.2, summary.3, check)
        }
    };

    TreeReport {
        kind,
        keys: traversal,
        len,
        height,
        stats,
        verified: check.as_ref().map(Result::is_ok),
        violation: check.and_then(Result::err).map(|err| err.to_string()),
    }
}

fn run_sort(cmd: SortCmd) -> Result<SortReport, Box<dyn Error>> {
    let algorithm = SortAlgorithm::from(cmd.algorithm);
    let mut values = cmd.values;
    let steps = if cmd.steps {
        if algorithm != SortAlgorithm::Heap {
            return Err(
                AlgoError::InvalidArgument("--steps is only supported for heap sort".into()).into(),
            );
        }
        Some(heap_sort_with_steps(&mut values))
    } else {
        algorithm.sort(&mut values);
        None
    };
    Ok(SortReport {
        algorithm,
        sorted: values,
        steps,
    })
}

fn build_bench_config(cmd: &BenchCmd) -> BenchConfig {
    let mut config = BenchConfig {
        seed: cmd.seed,
        ..BenchConfig::default()
    };
    if !cmd.sizes.is_empty() {
        config.sizes = cmd.sizes.clone();
    }
    if !cmd.algorithms.is_empty() {
        config.algorithms = cmd.algorithms.iter().map(|a| (*a).into()).collect();
    }
    if !cmd.distributions.is_empty() {
        config.distributions = cmd.distributions.iter().map(|d| (*d).into()).collect();
    }
    config
}

fn parse_row(raw: &str) -> Result<Vec<f64>, AlgoError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|e| AlgoError::InvalidArgument(format!("invalid number '{s}': {e}")))
        })
        .collect()
}

fn parse_matrix(raw: &str) -> Result<Vec<Vec<f64>>, AlgoError> {
    raw.split(';')
        .filter(|row| !row.trim().is_empty())
        .map(parse_row)
        .collect()
}

fn emit<T, F>(format: OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
    F: FnOnce(),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(),
    }
    Ok(())
}

fn joined<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_demo_text(report: &DemoReport) {
    println!("Inorder traversal of AVL tree: {}", joined(&report.avl));
    println!("Inorder traversal of 2-3 tree: {}", joined(&report.two_three));
    println!("Heap sort on [1,2,3,4,5]: {}", joined(&report.heap_ascending));
    println!("Heap sort on [5,4,3,2,1]: {}", joined(&report.heap_descending));
    let letters: Vec<char> = report.heap_letters.chars().collect();
    println!("Heap sort on [S,O,R,T,I,N,G]: {}", joined(&letters));
}

fn print_tree_text(report: &TreeReport) {
    println!("Inorder traversal of {} tree: {}", report.kind, joined(&report.keys));
    println!("  keys={} height={}", report.len, report.height);
    let stats = &report.stats;
    println!(
        "  inserts={} duplicates={} rotations={} splits={} root_growths={}",
        stats.inserts,
        stats.duplicates,
        stats.rotations(),
        stats.splits(),
        stats.root_growths
    );
    match (&report.verified, &report.violation) {
        (Some(true), _) => println!("  invariants: ok"),
        (Some(false), Some(violation)) => println!("  invariants: FAILED ({violation})"),
        _ => {}
    }
}

fn print_sort_text(report: &SortReport) {
    if let Some(steps) = &report.steps {
        for step in steps {
            let label = match step.phase {
                HeapPhase::Built => "built heap".to_string(),
                HeapPhase::Extracted { placed } => format!("placed [{placed}]"),
            };
            let (heap, sorted) = step.snapshot.split_at(step.heap_len);
            println!("{label:<14} heap: {} | sorted: {}", joined(heap), joined(sorted));
        }
    }
    println!("{} sort: {}", report.algorithm, joined(&report.sorted));
}

fn print_backsub_text(report: &BacksubReport) {
    println!("Back substitution pseudocode:");
    println!("{BACK_SUBSTITUTION_PSEUDOCODE}");
    println!();
    println!("{BACK_SUBSTITUTION_COMPLEXITY}");
    println!();
    println!("x = {}", joined(&report.solution));
}
