//! Teleportation correction
//!
//! Wraps a raw column-stochastic operator `M` (with dead-end holes) and
//! applies, without materializing it, the corrected matrix
//!
//! ```text
//! col_c = 1/N · 1                          if c is a dead end
//! col_c = beta · M[:, c] + (1 - beta)/N · 1 otherwise
//! ```
//!
//! Every column of the corrected matrix sums to one, so rank mass is
//! conserved and spider traps cannot absorb it.

use crate::error::{ensure_dim, Error, Result};
use crate::types::NodeId;

use super::{assert_column, TransitionOperator};

#[derive(Debug, Clone)]
pub struct TeleportedOperator<O> {
    inner: O,
    beta: f64,
    dead: Vec<bool>,
}

impl<O: TransitionOperator> TeleportedOperator<O> {
    /// Wrap `inner` with damping factor `beta` in `(0, 1]`.
    pub fn new(inner: O, beta: f64) -> Result<Self> {
        if !(beta > 0.0 && beta <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "beta must be in (0, 1], got {beta}"
            )));
        }
        let mut dead = vec![false; inner.dim()];
        for &col in inner.dead_ends() {
            dead[col as usize] = true;
        }
        Ok(Self { inner, beta, dead })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Materialize one corrected column as a dense vector.
    ///
    /// Costs O(N); meant for inspection, not for the iteration loop.
    pub fn column(&self, col: NodeId) -> Result<Vec<f64>> {
        let n = self.dim();
        let mut unit = vec![0.0; n];
        *unit
            .get_mut(col as usize)
            .ok_or(Error::DimensionMismatch {
                expected: n,
                actual: col as usize + 1,
            })? = 1.0;
        self.multiply(&unit)
    }
}

impl<O: TransitionOperator> TransitionOperator for TeleportedOperator<O> {
    fn dim(&self) -> usize {
        self.inner.dim()
    }

    /// None: every former dead end teleports uniformly.
    fn dead_ends(&self) -> &[NodeId] {
        &[]
    }

    fn column_sum(&self, col: NodeId) -> f64 {
        assert_column(col, self.dim());
        if self.dead[col as usize] {
            1.0
        } else {
            self.beta * self.inner.column_sum(col) + (1.0 - self.beta)
        }
    }

    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()> {
        let n = self.dim();
        ensure_dim(n, vector.len())?;
        ensure_dim(n, out.len())?;
        if n == 0 {
            return Ok(());
        }

        self.inner.multiply_into(vector, out)?;

        let (mut live_mass, mut dead_mass) = (0.0, 0.0);
        for (&mass, &is_dead) in vector.iter().zip(&self.dead) {
            if is_dead {
                dead_mass += mass;
            } else {
                live_mass += mass;
            }
        }
        let teleport = ((1.0 - self.beta) * live_mass + dead_mass) / n as f64;

        for value in out.iter_mut() {
            *value = self.beta * *value + teleport;
        }
        Ok(())
    }
}
