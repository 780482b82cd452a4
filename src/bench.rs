//! Timing harness comparing the sorts on generated inputs.
//!
//! Each measurement sorts a fresh copy of the input, checks the result and
//! appends one CSV row (`algorithm,n,distribution,time_ms`), flushing after
//! every row so partial results survive an interrupted run.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use csv::WriterBuilder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::error::{AlgoError, Result};
use crate::sort::{is_sorted, SortAlgorithm};
use crate::tree::Key;

/// Shape of a generated benchmark input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Uniform values in `1..=n`, duplicates allowed.
    Random,
    /// `1, 2, ..., n`.
    Ascending,
    /// `n, n-1, ..., 1`.
    Descending,
}

impl Distribution {
    /// Every distribution, in benchmark order.
    pub const ALL: [Distribution; 3] = [
        Distribution::Random,
        Distribution::Ascending,
        Distribution::Descending,
    ];

    /// Short lowercase name, as written to benchmark output.
    pub fn name(self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Ascending => "ascending",
            Distribution::Descending => "descending",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds an input of `n` keys following `distribution`.
pub fn generate<R: Rng>(distribution: Distribution, n: usize, rng: &mut R) -> Vec<Key> {
    let top = n as Key;
    match distribution {
        Distribution::Random => (0..n).map(|_| rng.gen_range(1..=top)).collect(),
        Distribution::Ascending => (1..=top).collect(),
        Distribution::Descending => (1..=top).rev().collect(),
    }
}

/// Configuration knobs for a benchmark run.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Input sizes to measure.
    pub sizes: Vec<usize>,
    /// Input shapes to measure.
    pub distributions: Vec<Distribution>,
    /// Sorts to measure.
    pub algorithms: Vec<SortAlgorithm>,
    /// Seed for random inputs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![100, 1_000, 10_000, 100_000, 1_000_000],
            distributions: Distribution::ALL.to_vec(),
            algorithms: SortAlgorithm::ALL.to_vec(),
            seed: None,
        }
    }
}

impl BenchConfig {
    fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(AlgoError::InvalidArgument("no input sizes given".into()));
        }
        if self.distributions.is_empty() {
            return Err(AlgoError::InvalidArgument("no distributions given".into()));
        }
        if self.algorithms.is_empty() {
            return Err(AlgoError::InvalidArgument("no algorithms given".into()));
        }
        Ok(())
    }
}

/// One measurement, serialized as a CSV row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchRecord {
    /// Sort that was timed.
    pub algorithm: SortAlgorithm,
    /// Number of keys sorted.
    pub n: usize,
    /// Shape of the input.
    pub distribution: Distribution,
    /// Wall-clock time in milliseconds, rounded to microseconds.
    pub time_ms: f64,
}

fn millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1_000_000.0).round() / 1_000.0
}

/// Runs every algorithm x size x distribution combination and writes one CSV
/// row per measurement to `out`.
pub fn run_suite<W: Write>(config: &BenchConfig, out: W) -> Result<Vec<BenchRecord>> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut writer = WriterBuilder::new().from_writer(out);
    let mut records = Vec::new();

    for &algorithm in &config.algorithms {
        for &n in &config.sizes {
            for &distribution in &config.distributions {
                let mut input = generate(distribution, n, &mut rng);

                let start = Instant::now();
                algorithm.sort(&mut input);
                let time_ms = millis(start.elapsed());

                if !is_sorted(&input) {
                    return Err(AlgoError::InvariantViolation(format!(
                        "{algorithm} sort left {distribution} input of {n} keys unsorted"
                    )));
                }

                let record = BenchRecord {
                    algorithm,
                    n,
                    distribution,
                    time_ms,
                };
                writer.serialize(&record)?;
                writer.flush()?;
                info!(%algorithm, n, %distribution, time_ms, "finished sort");
                records.push(record);
            }
        }
    }
    Ok(records)
}

/// Like [`run_suite`], writing the CSV to a newly created file at `path`.
pub fn run_suite_to_path(config: &BenchConfig, path: &Path) -> Result<Vec<BenchRecord>> {
    let file = File::create(path)?;
    let records = run_suite(config, file)?;
    info!(path = %path.display(), rows = records.len(), "results written");
    Ok(records)
}
