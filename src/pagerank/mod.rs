//! PageRank algorithms
//!
//! This module provides the transition-operator interface, the lazy
//! teleportation correction, the power-iteration loop, and the engine that
//! wires a [`Variant`](crate::types::Variant) to concrete strategies.

pub mod engine;
pub mod power;
pub mod teleport;

use serde::Serialize;

use crate::error::Result;
use crate::types::NodeId;

/// A square linear operator that maps a rank vector to its successor.
///
/// Implementations are the sparse matrices in [`crate::graph`] and the
/// [`teleport::TeleportedOperator`] wrapper.
pub trait TransitionOperator {
    /// Number of rows (and columns).
    fn dim(&self) -> usize;

    /// Columns with no outgoing probability mass.
    fn dead_ends(&self) -> &[NodeId];

    /// Sum of column `col`. One for stochastic columns, zero for dead ends.
    ///
    /// # Panics
    ///
    /// Panics if `col` is not below [`dim`](Self::dim).
    fn column_sum(&self, col: NodeId) -> f64;

    /// Write `self · vector` into `out`, overwriting its previous contents.
    ///
    /// Fails with [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if either slice length differs from [`dim`](Self::dim).
    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()>;

    /// Out-of-place multiply returning a fresh vector.
    fn multiply(&self, vector: &[f64]) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.dim()];
        self.multiply_into(vector, &mut out)?;
        Ok(out)
    }
}

impl<T: TransitionOperator + ?Sized> TransitionOperator for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn dead_ends(&self) -> &[NodeId] {
        (**self).dead_ends()
    }

    fn column_sum(&self, col: NodeId) -> f64 {
        (**self).column_sum(col)
    }

    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()> {
        (**self).multiply_into(vector, out)
    }
}

/// Panic unless `col` indexes a column of a `dim`-sized operator.
pub(crate) fn assert_column(col: NodeId, dim: usize) {
    assert!(
        (col as usize) < dim,
        "column {col} out of range for dimension {dim}"
    );
}

/// Terminal state of a power iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationStatus {
    /// The L1 change fell below the tolerance.
    Converged,
    /// The iteration cap was hit first; the vector is a best-effort result.
    Exhausted,
}

/// Result of a PageRank computation
#[derive(Debug, Clone, Serialize)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// How the iteration ended
    pub status: IterationStatus,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, status: IterationStatus) -> Self {
        Self {
            scores,
            iterations,
            delta,
            status,
        }
    }

    /// Whether the algorithm converged
    pub fn converged(&self) -> bool {
        self.status == IterationStatus::Converged
    }

    /// Sum of all scores. Below one when rank leaked through dead ends.
    pub fn total_mass(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(NodeId, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as NodeId, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: NodeId) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Number of nodes ranked
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageRankResult {
        PageRankResult::new(vec![0.1, 0.4, 0.2, 0.2], 7, 1e-13, IterationStatus::Converged)
    }

    #[test]
    fn test_top_n_orders_by_score_then_id() {
        let top = sample().top_n(3);
        assert_eq!(top, vec![(1, 0.4), (2, 0.2), (3, 0.2)]);
    }

    #[test]
    fn test_score_out_of_range_is_zero() {
        let result = sample();
        assert_eq!(result.score(1), 0.4);
        assert_eq!(result.score(99), 0.0);
    }

    #[test]
    fn test_total_mass() {
        assert!((sample().total_mass() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "converged");
        assert_eq!(json["iterations"], 7);
        let exhausted = serde_json::to_value(IterationStatus::Exhausted).unwrap();
        assert_eq!(exhausted, "exhausted");
    }
}
