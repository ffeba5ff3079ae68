//! Transition matrix builder with efficient link counting
//!
//! Accumulates raw link counts per source column in an `FxHashMap` for O(1)
//! updates during construction. Normalization happens when the builder is
//! frozen into a [`TransitionMatrix`](super::transition::TransitionMatrix).

use log::{debug, warn};
use rustc_hash::FxHashMap;

use super::edges::EdgeList;
use crate::types::NodeId;

/// One column under construction: the out-links of a single source node.
#[derive(Debug, Clone, Default)]
pub struct BuilderColumn {
    /// Target row -> raw link count
    pub links: FxHashMap<NodeId, f64>,
    /// Total number of out-links, duplicates included
    pub out_degree: f64,
}

/// A mutable column-oriented link counter.
#[derive(Debug)]
pub struct MatrixBuilder {
    columns: Vec<BuilderColumn>,
    num_edges: usize,
    duplicates: usize,
}

impl MatrixBuilder {
    /// Create a builder for a node space of `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            columns: vec![BuilderColumn::default(); num_nodes],
            num_edges: 0,
            duplicates: 0,
        }
    }

    /// Count every edge of `edges` and report duplicates once at the end.
    pub fn from_edges(edges: &EdgeList) -> Self {
        let mut builder = Self::new(edges.num_nodes());
        for edge in edges {
            builder.add_link(edge.source, edge.target);
        }
        if builder.duplicates > 0 {
            warn!(
                "{} duplicate edge(s) found; each adds link multiplicity",
                builder.duplicates
            );
        }
        builder
    }

    /// Record one link `source -> target`.
    ///
    /// Returns `true` if the link was already present (a duplicate edge).
    /// Self-loops are counted like any other link.
    pub fn add_link(&mut self, source: NodeId, target: NodeId) -> bool {
        let column = &mut self.columns[source as usize];
        let count = column.links.entry(target).or_insert(0.0);
        *count += 1.0;
        column.out_degree += 1.0;
        self.num_edges += 1;

        let duplicate = *count > 1.0;
        if duplicate {
            self.duplicates += 1;
            debug!("duplicate edge {source} -> {target}");
        }
        duplicate
    }

    pub fn num_nodes(&self) -> usize {
        self.columns.len()
    }

    /// Number of links recorded, duplicates included.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Number of links that repeated an existing (source, target) pair.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Iterate over all columns
    pub fn columns(&self) -> impl Iterator<Item = (NodeId, &BuilderColumn)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i as NodeId, c))
    }
}
