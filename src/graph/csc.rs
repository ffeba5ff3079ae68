//! Compressed Sparse Column (CSC) transition matrix
//!
//! CSC groups entries by source column, which is exactly what the scatter
//! form of the PageRank multiply needs: each column's mass is pushed to its
//! rows in one contiguous pass.

use log::{debug, warn};

use super::edges::EdgeList;
use crate::error::{ensure_dim, Result};
use crate::pagerank::{assert_column, TransitionOperator};
use crate::types::NodeId;

/// A column-stochastic matrix in Compressed Sparse Column format
#[derive(Debug, Clone)]
pub struct CscMatrix {
    /// Number of nodes (rows and columns)
    pub num_nodes: usize,
    /// Column pointers: column j's entries are at indices col_ptr[j]..col_ptr[j+1]
    pub col_ptr: Vec<usize>,
    /// Row indices (target nodes) for each entry
    pub row_idx: Vec<NodeId>,
    /// Transition probabilities
    pub values: Vec<f64>,
    /// Columns with no out-links
    dead_ends: Vec<NodeId>,
    /// Edges that repeated an existing link
    duplicates: usize,
}

impl CscMatrix {
    /// Build directly from an edge list with a counting sort on source.
    ///
    /// Duplicate links are merged into one entry whose weight is
    /// `multiplicity / out_degree`.
    pub fn from_edges(edges: &EdgeList) -> Self {
        let num_nodes = edges.num_nodes();
        let degree = edges.out_degrees();

        let mut slot_ptr = Vec::with_capacity(num_nodes + 1);
        slot_ptr.push(0usize);
        for &d in &degree {
            let last = slot_ptr[slot_ptr.len() - 1];
            slot_ptr.push(last + d as usize);
        }

        let mut next = slot_ptr.clone();
        let mut rows = vec![0 as NodeId; edges.len()];
        for edge in edges {
            let src = edge.source as usize;
            rows[next[src]] = edge.target;
            next[src] += 1;
        }

        let mut col_ptr = Vec::with_capacity(num_nodes + 1);
        let mut row_idx = Vec::with_capacity(edges.len());
        let mut values = Vec::with_capacity(edges.len());
        let mut dead_ends = Vec::new();
        let mut duplicates = 0;
        col_ptr.push(0);

        for col in 0..num_nodes {
            let out_degree = degree[col] as f64;
            if degree[col] == 0 {
                dead_ends.push(col as NodeId);
            }

            let slots = &mut rows[slot_ptr[col]..slot_ptr[col + 1]];
            slots.sort_unstable();

            let mut i = 0;
            while i < slots.len() {
                let row = slots[i];
                let mut j = i + 1;
                while j < slots.len() && slots[j] == row {
                    j += 1;
                }
                if j - i > 1 {
                    debug!("duplicate edge {col} -> {row} (x{})", j - i);
                    duplicates += j - i - 1;
                }
                row_idx.push(row);
                values.push((j - i) as f64 / out_degree);
                i = j;
            }

            col_ptr.push(row_idx.len());
        }

        if duplicates > 0 {
            warn!("{duplicates} duplicate edge(s) found; each adds link multiplicity");
        }

        Self {
            num_nodes,
            col_ptr,
            row_idx,
            values,
            dead_ends,
            duplicates,
        }
    }

    /// Iterate over the nonzero entries of a column
    pub fn column(&self, col: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let start = self.col_ptr[col as usize];
        let end = self.col_ptr[col as usize + 1];
        (start..end).map(move |i| (self.row_idx[i], self.values[i]))
    }

    /// Number of distinct links stored
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Check if the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }
}

impl Default for CscMatrix {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            col_ptr: vec![0],
            row_idx: Vec::new(),
            values: Vec::new(),
            dead_ends: Vec::new(),
            duplicates: 0,
        }
    }
}

impl TransitionOperator for CscMatrix {
    fn dim(&self) -> usize {
        self.num_nodes
    }

    fn dead_ends(&self) -> &[NodeId] {
        &self.dead_ends
    }

    fn column_sum(&self, col: NodeId) -> f64 {
        assert_column(col, self.num_nodes);
        self.column(col).map(|(_, w)| w).sum()
    }

    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()> {
        ensure_dim(self.num_nodes, vector.len())?;
        ensure_dim(self.num_nodes, out.len())?;

        out.fill(0.0);
        for (col, &mass) in vector.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            let range = self.col_ptr[col]..self.col_ptr[col + 1];
            for (&row, &weight) in self.row_idx[range.clone()].iter().zip(&self.values[range]) {
                out[row as usize] += weight * mass;
            }
        }
        Ok(())
    }
}
