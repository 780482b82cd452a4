//! Back substitution for upper-triangular systems `Ux = b`.

use crate::error::{AlgoError, Result};

/// Pseudocode of the back-substitution stage, as printed by the CLI.
pub const BACK_SUBSTITUTION_PSEUDOCODE: &str = "\
for i = n-1 .. 0:
    sum = 0
    for j = i+1 .. n-1:
        sum = sum + U[i][j] * x[j]
    x[i] = (b[i] - sum) / U[i][i]";

/// Why the stage runs in quadratic time.
pub const BACK_SUBSTITUTION_COMPLEXITY: &str = "\
The outer loop runs n times (i = n-1 .. 0). For each i the inner loop sums
over j = i+1 .. n-1, so the total work is (n-1) + (n-2) + ... + 1 = n(n-1)/2
multiply-adds. That is a quadratic function of n, hence Θ(n^2).";

/// Solves `Ux = b` for an upper-triangular `n x n` matrix `u`.
///
/// Entries below the diagonal are ignored. An empty system yields an empty
/// solution.
pub fn back_substitution(u: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
    let n = u.len();
    if b.len() != n {
        return Err(AlgoError::DimensionMismatch {
            expected: n,
            found: b.len(),
        });
    }
    if let Some(row) = u.iter().find(|row| row.len() != n) {
        return Err(AlgoError::DimensionMismatch {
            expected: n,
            found: row.len(),
        });
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|j| u[i][j] * x[j]).sum();
        let diag = u[i][i];
        if diag == 0.0 {
            return Err(AlgoError::ZeroPivot { row: i });
        }
        x[i] = (b[i] - sum) / diag;
    }
    Ok(x)
}
