//! # edge-rank
//!
//! PageRank over directed edge lists by power iteration on a sparse,
//! column-stochastic transition matrix.
//!
//! ## Pipeline
//!
//! ```text
//! EdgeList → transition matrix → [teleport correction] → power iteration → PageRankResult
//! ```
//!
//! ## Variants
//!
//! - **small_corrected**: adjacency-list matrix with a lazily applied
//!   teleportation correction (damping `beta`, dead ends teleport uniformly).
//!   Rank mass is conserved. Default tolerance 1e-12.
//! - **large_manual**: hand-rolled CSC matrix, no correction. Mass leaks at
//!   dead ends. Default tolerance 1.6e-2.
//! - **large_optimized**: `sprs` CSC matrix, otherwise identical to
//!   `large_manual`.
//!
//! ## Example
//!
//! ```rust
//! use edge_rank::{rank, EdgeList, RankConfig, Variant};
//!
//! let edges = EdgeList::from_pairs([(0, 1), (1, 2), (2, 0)]).unwrap();
//! let result = rank(&edges, &RankConfig::new(Variant::SmallCorrected)).unwrap();
//! assert!(result.converged());
//! assert!((result.score(0) - 1.0 / 3.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod graph;
pub mod io;
pub mod pagerank;
pub mod types;

pub use error::{Error, Result};
pub use graph::csc::CscMatrix;
pub use graph::edges::EdgeList;
pub use graph::optimized::SprsMatrix;
pub use graph::transition::TransitionMatrix;
pub use graph::GraphStats;
pub use pagerank::engine::{rank, RankEngine};
pub use pagerank::power::PowerIteration;
pub use pagerank::teleport::TeleportedOperator;
pub use pagerank::{IterationStatus, PageRankResult, TransitionOperator};
pub use types::{Edge, NodeId, RankConfig, Variant};
