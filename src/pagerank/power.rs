//! Power iteration
//!
//! Repeatedly applies a [`TransitionOperator`] to a probability vector,
//! starting from the uniform distribution, until the L1 change between two
//! consecutive iterates drops below `epsilon` or `max_iterations` steps have
//! run. Hitting the cap is not an error: the last iterate is returned with
//! [`IterationStatus::Exhausted`].

use log::{debug, info};

use super::{IterationStatus, PageRankResult, TransitionOperator};
use crate::error::{ensure_dim, Result};
use crate::types::{DEFAULT_EPSILON_CORRECTED, DEFAULT_MAX_ITERATIONS};

#[derive(Debug, Clone, PartialEq)]
pub struct PowerIteration {
    /// Convergence threshold on the L1 change
    pub epsilon: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON_CORRECTED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl PowerIteration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence threshold
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Iterate from the uniform vector `1/N`.
    pub fn run<O: TransitionOperator + ?Sized>(&self, operator: &O) -> Result<PageRankResult> {
        let n = operator.dim();
        if n == 0 {
            return Ok(PageRankResult::new(vec![], 0, 0.0, IterationStatus::Converged));
        }
        self.run_from(operator, vec![1.0 / n as f64; n])
    }

    /// Iterate from an arbitrary starting vector.
    pub fn run_from<O: TransitionOperator + ?Sized>(
        &self,
        operator: &O,
        initial: Vec<f64>,
    ) -> Result<PageRankResult> {
        let n = operator.dim();
        ensure_dim(n, initial.len())?;
        if n == 0 {
            return Ok(PageRankResult::new(initial, 0, 0.0, IterationStatus::Converged));
        }

        let mut scores = initial;
        let mut new_scores = vec![0.0; n];
        let mut iterations = 0;

        loop {
            operator.multiply_into(&scores, &mut new_scores)?;

            // L1 norm of the change against the immediately prior iterate
            let delta: f64 = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
            iterations += 1;
            debug!("iteration {iterations}: delta = {delta:e}");

            if delta < self.epsilon {
                info!("converged after {iterations} iteration(s), delta = {delta:e}");
                return Ok(PageRankResult::new(
                    scores,
                    iterations,
                    delta,
                    IterationStatus::Converged,
                ));
            }
            if iterations >= self.max_iterations {
                info!(
                    "stopped at iteration cap {} without converging, delta = {delta:e}",
                    self.max_iterations
                );
                return Ok(PageRankResult::new(
                    scores,
                    iterations,
                    delta,
                    IterationStatus::Exhausted,
                ));
            }
        }
    }
}
