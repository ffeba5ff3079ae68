//! Edge ingest
//!
//! Turns raw integer coordinate pairs into an [`EdgeList`] and fixes the
//! size of the node space (`1 + largest index seen`).

use crate::error::{Error, Result};
use crate::types::{Edge, NodeId};

/// An ordered edge list together with the size of its node space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    edges: Vec<Edge>,
    num_nodes: usize,
}

impl EdgeList {
    /// Build from already-typed edges. Never fails.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        let num_nodes = edges
            .iter()
            .map(|e| e.source.max(e.target) as usize + 1)
            .max()
            .unwrap_or(0);
        Self { edges, num_nodes }
    }

    /// Build from raw integer pairs as handed over by a parser.
    ///
    /// Negative indices and indices beyond [`NodeId::MAX`] are rejected with
    /// [`Error::MalformedInput`]; `record` in the error is the 1-based pair
    /// position.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let pairs = pairs.into_iter();
        let mut edges = Vec::with_capacity(pairs.size_hint().0);
        for (i, (source, target)) in pairs.enumerate() {
            let source = to_node_id(source, i + 1)?;
            let target = to_node_id(target, i + 1)?;
            edges.push(Edge::new(source, target));
        }
        Ok(Self::from_edges(edges))
    }

    /// Number of nodes `N` (largest index + 1, or 0 when empty).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of edges, duplicates included.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Out-degree of every node, counting duplicate edges separately.
    pub fn out_degrees(&self) -> Vec<u32> {
        let mut degree = vec![0u32; self.num_nodes];
        for edge in &self.edges {
            degree[edge.source as usize] += 1;
        }
        degree
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl FromIterator<Edge> for EdgeList {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self::from_edges(iter.into_iter().collect())
    }
}

fn to_node_id(value: i64, record: usize) -> Result<NodeId> {
    NodeId::try_from(value)
        .map_err(|_| Error::malformed(record, format!("node index {value} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_is_max_plus_one() {
        let list = EdgeList::from_pairs([(0, 1), (5, 2), (3, 4)]).unwrap();
        assert_eq!(list.num_nodes(), 6);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_target_can_be_largest() {
        // Either endpoint may carry the maximum.
        let list = EdgeList::from_pairs([(0, 9)]).unwrap();
        assert_eq!(list.num_nodes(), 10);
    }

    #[test]
    fn test_empty_list() {
        let list = EdgeList::from_pairs(std::iter::empty()).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.num_nodes(), 0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let list = EdgeList::from_pairs([(0, 1), (0, 1), (0, 2)]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.out_degrees(), vec![3, 0, 0]);
    }

    #[test]
    fn test_negative_index_rejected() {
        let err = EdgeList::from_pairs([(0, 1), (-1, 2)]).unwrap_err();
        match err {
            Error::MalformedInput { record, .. } => assert_eq!(record, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_index_rejected() {
        assert!(EdgeList::from_pairs([(0, i64::from(u32::MAX) + 1)]).is_err());
    }

    #[test]
    fn test_order_preserved() {
        let list: EdgeList = vec![Edge::new(2, 0), Edge::new(0, 1)].into_iter().collect();
        assert_eq!(list.edges()[0], Edge::new(2, 0));
        assert_eq!(list.edges()[1], Edge::new(0, 1));
    }
}
