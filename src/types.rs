//! Core value types shared across the crate.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Index of a node in the implicit node space `0..N`.
pub type NodeId = u32;

/// A directed link from `source` to `target`.
///
/// Duplicate edges are legal and add link multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Returns `true` if the edge points back at its own source.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        Self::new(source, target)
    }
}

/// Which ranking engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Small graphs: teleportation-corrected, tight tolerance.
    #[default]
    SmallCorrected,
    /// Large graphs: no correction, hand-rolled CSC multiply.
    LargeManual,
    /// Large graphs: no correction, `sprs` CSC multiply.
    LargeOptimized,
}

impl Variant {
    /// Returns the user-facing name used in JSON and log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallCorrected => "small_corrected",
            Self::LargeManual => "large_manual",
            Self::LargeOptimized => "large_optimized",
        }
    }

    /// Whether the teleportation correction is applied.
    pub fn is_corrected(&self) -> bool {
        matches!(self, Self::SmallCorrected)
    }

    /// Convergence tolerance used when none is configured explicitly.
    pub fn default_epsilon(&self) -> f64 {
        match self {
            Self::SmallCorrected => DEFAULT_EPSILON_CORRECTED,
            Self::LargeManual | Self::LargeOptimized => DEFAULT_EPSILON_UNCORRECTED,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_BETA: f64 = 0.85;
pub const DEFAULT_EPSILON_CORRECTED: f64 = 1e-12;
pub const DEFAULT_EPSILON_UNCORRECTED: f64 = 1.6e-2;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Configuration for a ranking run.
///
/// # JSON shape
///
/// ```json
/// { "variant": "large_manual", "epsilon": 0.01, "max_iterations": 500 }
/// ```
///
/// Omitted fields take their defaults; `epsilon` falls back to the
/// variant's own tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    pub variant: Variant,
    /// Damping factor; only meaningful for [`Variant::SmallCorrected`].
    pub beta: f64,
    /// L1 convergence tolerance. `None` means the variant default.
    pub epsilon: Option<f64>,
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            beta: DEFAULT_BETA,
            epsilon: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RankConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Set the damping factor
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the convergence tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// The tolerance actually used: explicit value or the variant default.
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or_else(|| self.variant.default_epsilon())
    }

    /// Load a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "beta must be in (0, 1], got {}",
                self.beta
            )));
        }
        let epsilon = self.effective_epsilon();
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "epsilon must be a positive finite number, got {epsilon}"
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
