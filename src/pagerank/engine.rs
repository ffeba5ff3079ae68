//! Ranking engine: wires a [`Variant`] to its matrix and iteration strategy.
//!
//! ```text
//! EdgeList → matrix build → [teleport correction] → power iteration → PageRankResult
//! ```
//!
//! | Variant | Matrix | Correction | Default epsilon |
//! |---------|--------|------------|-----------------|
//! | `small_corrected` | [`TransitionMatrix`] | [`TeleportedOperator`] | 1e-12 |
//! | `large_manual` | [`CscMatrix`] | none | 1.6e-2 |
//! | `large_optimized` | [`SprsMatrix`] | none | 1.6e-2 |
//!
//! The two large-graph strategies sit behind the same
//! [`TransitionOperator`] interface and produce the same vector up to
//! floating-point reassociation.

use std::time::Instant;

use log::{info, trace};

use super::power::PowerIteration;
use super::teleport::TeleportedOperator;
use super::{PageRankResult, TransitionOperator};
use crate::error::Result;
use crate::graph::csc::CscMatrix;
use crate::graph::edges::EdgeList;
use crate::graph::optimized::SprsMatrix;
use crate::graph::transition::TransitionMatrix;
use crate::types::{RankConfig, Variant};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for an engine stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rank_stage", stage = $name).entered();
    };
}

/// Runs one configured ranking variant over edge lists.
#[derive(Debug, Clone)]
pub struct RankEngine {
    config: RankConfig,
}

impl RankEngine {
    /// Create an engine, rejecting out-of-range parameters up front.
    pub fn new(config: RankConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Build the transition operator the configured variant iterates on.
    pub fn build_operator(&self, edges: &EdgeList) -> Result<Box<dyn TransitionOperator>> {
        trace_stage!("build");
        let start = Instant::now();

        let operator: Box<dyn TransitionOperator> = match self.config.variant {
            Variant::SmallCorrected => {
                let matrix = TransitionMatrix::from_edges(edges);
                info!(
                    "teleportation enabled: beta = {}, {} dead end(s) teleport uniformly",
                    self.config.beta,
                    matrix.dead_ends().len()
                );
                Box::new(TeleportedOperator::new(matrix, self.config.beta)?)
            }
            Variant::LargeManual => Box::new(CscMatrix::from_edges(edges)),
            Variant::LargeOptimized => Box::new(SprsMatrix::from_edges(edges)),
        };

        trace!(
            "{} transition operator built in {:?}",
            self.config.variant,
            start.elapsed()
        );
        Ok(operator)
    }

    /// Rank the nodes of `edges`.
    pub fn run(&self, edges: &EdgeList) -> Result<PageRankResult> {
        info!(
            "ranking {} node(s), {} edge(s) with {}",
            edges.num_nodes(),
            edges.len(),
            self.config.variant
        );
        let operator = self.build_operator(edges)?;

        trace_stage!("iterate");
        let start = Instant::now();
        let power = PowerIteration::new()
            .with_epsilon(self.config.effective_epsilon())
            .with_max_iterations(self.config.max_iterations);
        let result = power.run(operator.as_ref())?;
        trace!("power iteration finished in {:?}", start.elapsed());

        info!(
            "{:.6}% of rank retained in vector",
            result.total_mass() * 100.0
        );
        Ok(result)
    }
}

/// Convenience wrapper: validate `config` and rank `edges` in one call.
pub fn rank(edges: &EdgeList, config: &RankConfig) -> Result<PageRankResult> {
    RankEngine::new(config.clone())?.run(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pagerank::IterationStatus;

    fn edges(pairs: &[(i64, i64)]) -> EdgeList {
        EdgeList::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = RankEngine::new(RankConfig::default().with_beta(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_corrected_variant_conserves_mass() {
        let list = edges(&[(0, 1), (1, 2), (2, 1), (3, 0)]);
        let result = rank(&list, &RankConfig::new(Variant::SmallCorrected)).unwrap();

        assert!(result.converged());
        assert!((result.total_mass() - 1.0).abs() < 1e-9);
        assert!(result.scores.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_large_variants_agree() {
        let list = edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 1), (1, 1), (0, 1)]);
        let manual = rank(&list, &RankConfig::new(Variant::LargeManual)).unwrap();
        let optimized = rank(&list, &RankConfig::new(Variant::LargeOptimized)).unwrap();

        assert_eq!(manual.iterations, optimized.iterations);
        assert_eq!(manual.status, optimized.status);
        for (a, b) in manual.scores.iter().zip(&optimized.scores) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_iteration_cap_honoured() {
        let list = edges(&[(0, 1), (1, 2), (2, 0), (0, 2)]);
        let cfg = RankConfig::new(Variant::SmallCorrected)
            .with_epsilon(1e-300)
            .with_max_iterations(3);
        let result = rank(&list, &cfg).unwrap();

        assert_eq!(result.iterations, 3);
        assert_eq!(result.status, IterationStatus::Exhausted);
    }

    #[test]
    fn test_empty_edge_list() {
        let result = rank(&EdgeList::default(), &RankConfig::default()).unwrap();
        assert!(result.converged());
        assert!(result.is_empty());
    }
}
