//! Graph ingest and transition-matrix representations
//!
//! This module turns edge lists into column-stochastic transition matrices.
//! Three representations share the [`TransitionOperator`](crate::pagerank::TransitionOperator)
//! interface: an adjacency list for small graphs, a hand-rolled CSC matrix,
//! and an `sprs`-backed CSC matrix for large graphs.

pub mod builder;
pub mod csc;
pub mod edges;
pub mod optimized;
pub mod transition;

use serde::Serialize;

use crate::pagerank::TransitionOperator;
use edges::EdgeList;

/// Summary statistics of an edge list and its transition matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub links: usize,
    pub duplicates: usize,
    pub dead_ends: usize,
    pub self_loops: usize,
}

impl GraphStats {
    pub fn from_edges(edges: &EdgeList) -> Self {
        let matrix = csc::CscMatrix::from_edges(edges);
        Self {
            nodes: edges.num_nodes(),
            edges: edges.len(),
            links: matrix.nnz(),
            duplicates: matrix.duplicates(),
            dead_ends: matrix.dead_ends().len(),
            self_loops: edges.iter().filter(|e| e.is_self_loop()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_stats() {
        let edges = EdgeList::from_pairs([(0, 1), (0, 1), (1, 1), (1, 3)]).unwrap();
        let stats = GraphStats::from_edges(&edges);
        assert_eq!(
            stats,
            GraphStats {
                nodes: 4,
                edges: 4,
                links: 3,
                duplicates: 1,
                dead_ends: 2,
                self_loops: 1,
            }
        );
    }
}
