//! Column-stochastic transition matrix (adjacency-list form)
//!
//! Each column holds the `(row, weight)` pairs of one source node, sorted by
//! row. Entry `(row, col)` is the probability of stepping from `col` to `row`.
//! This is the representation used by the small-graph path, where
//! readability matters more than throughput.

use super::builder::MatrixBuilder;
use super::edges::EdgeList;
use crate::error::{ensure_dim, Result};
use crate::pagerank::{assert_column, TransitionOperator};
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    num_nodes: usize,
    columns: Vec<Vec<(NodeId, f64)>>,
    dead_ends: Vec<NodeId>,
    duplicates: usize,
}

impl TransitionMatrix {
    /// Normalize a builder's link counts by out-degree.
    ///
    /// Columns with zero out-degree stay empty and are reported as dead ends.
    pub fn from_builder(builder: &MatrixBuilder) -> Self {
        let mut columns = Vec::with_capacity(builder.num_nodes());
        let mut dead_ends = Vec::new();

        for (col, column) in builder.columns() {
            if column.out_degree == 0.0 {
                dead_ends.push(col);
                columns.push(Vec::new());
                continue;
            }

            // Sort for deterministic iteration
            let mut entries: Vec<_> = column
                .links
                .iter()
                .map(|(&row, &count)| (row, count / column.out_degree))
                .collect();
            entries.sort_by_key(|(row, _)| *row);
            columns.push(entries);
        }

        Self {
            num_nodes: builder.num_nodes(),
            columns,
            dead_ends,
            duplicates: builder.duplicates(),
        }
    }

    pub fn from_edges(edges: &EdgeList) -> Self {
        Self::from_builder(&MatrixBuilder::from_edges(edges))
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of stored nonzero entries.
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Number of edges that repeated an existing link.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Iterate over the nonzero `(row, weight)` entries of a column
    pub fn column(&self, col: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.columns[col as usize].iter().copied()
    }

    /// Weight at `(row, col)`, zero when absent.
    pub fn get(&self, row: NodeId, col: NodeId) -> f64 {
        let column = &self.columns[col as usize];
        column
            .binary_search_by_key(&row, |(r, _)| *r)
            .map(|i| column[i].1)
            .unwrap_or(0.0)
    }

    pub fn is_dead_end(&self, col: NodeId) -> bool {
        self.columns[col as usize].is_empty()
    }
}

impl TransitionOperator for TransitionMatrix {
    fn dim(&self) -> usize {
        self.num_nodes
    }

    fn dead_ends(&self) -> &[NodeId] {
        &self.dead_ends
    }

    fn column_sum(&self, col: NodeId) -> f64 {
        assert_column(col, self.num_nodes);
        self.columns[col as usize].iter().map(|(_, w)| w).sum()
    }

    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()> {
        ensure_dim(self.num_nodes, vector.len())?;
        ensure_dim(self.num_nodes, out.len())?;

        out.fill(0.0);
        for (column, &mass) in self.columns.iter().zip(vector) {
            if mass == 0.0 {
                continue;
            }
            for &(row, weight) in column {
                out[row as usize] += weight * mass;
            }
        }
        Ok(())
    }
}
