//! `sprs`-backed transition matrix for the optimized large-graph path.
//!
//! Construction goes through a triplet matrix: each edge contributes
//! `1 / out_degree` at `(target, source)`, and the CSC conversion sums
//! duplicate triplets, which yields `multiplicity / out_degree`.

use log::warn;
use ndarray::ArrayView1;
use sprs::{CsMat, TriMat};

use super::edges::EdgeList;
use crate::error::{ensure_dim, Result};
use crate::pagerank::{assert_column, TransitionOperator};
use crate::types::NodeId;

#[derive(Debug, Clone)]
pub struct SprsMatrix {
    inner: CsMat<f64>,
    dead_ends: Vec<NodeId>,
    duplicates: usize,
}

impl SprsMatrix {
    pub fn from_edges(edges: &EdgeList) -> Self {
        let n = edges.num_nodes();
        let degree = edges.out_degrees();

        let mut triplets = TriMat::with_capacity((n, n), edges.len());
        for edge in edges {
            let weight = 1.0 / degree[edge.source as usize] as f64;
            triplets.add_triplet(edge.target as usize, edge.source as usize, weight);
        }
        let inner: CsMat<f64> = triplets.to_csc();

        let dead_ends = degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| i as NodeId)
            .collect();

        let duplicates = edges.len() - inner.nnz();
        if duplicates > 0 {
            warn!("{duplicates} duplicate edge(s) found; each adds link multiplicity");
        }

        Self {
            inner,
            dead_ends,
            duplicates,
        }
    }

    /// The underlying `sprs` matrix.
    pub fn as_csmat(&self) -> &CsMat<f64> {
        &self.inner
    }

    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

impl TransitionOperator for SprsMatrix {
    fn dim(&self) -> usize {
        self.inner.cols()
    }

    fn dead_ends(&self) -> &[NodeId] {
        &self.dead_ends
    }

    fn column_sum(&self, col: NodeId) -> f64 {
        assert_column(col, self.dim());
        self.inner
            .outer_view(col as usize)
            .map_or(0.0, |column| column.data().iter().sum())
    }

    fn multiply_into(&self, vector: &[f64], out: &mut [f64]) -> Result<()> {
        ensure_dim(self.dim(), vector.len())?;
        ensure_dim(self.dim(), out.len())?;

        let product = &self.inner * &ArrayView1::from(vector);
        for (slot, value) in out.iter_mut().zip(product.iter()) {
            *slot = *value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::csc::CscMatrix;

    fn edges(pairs: &[(i64, i64)]) -> EdgeList {
        EdgeList::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_column_stochastic() {
        let m = SprsMatrix::from_edges(&edges(&[(0, 1), (0, 2), (1, 2), (2, 0)]));
        assert_eq!(m.dim(), 3);
        for col in 0..3 {
            assert!((m.column_sum(col) - 1.0).abs() < 1e-9);
        }
        assert!(m.dead_ends().is_empty());
    }

    #[test]
    fn test_duplicates_summed() {
        let m = SprsMatrix::from_edges(&edges(&[(0, 1), (0, 1), (0, 2)]));
        assert_eq!(m.duplicates(), 1);
        let w = m.as_csmat().get(1, 0).copied().unwrap_or(0.0);
        assert!((w - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_manual_csc() {
        let list = edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 3), (0, 4)]);
        let fast = SprsMatrix::from_edges(&list);
        let manual = CscMatrix::from_edges(&list);
        assert_eq!(fast.dead_ends(), manual.dead_ends());

        let x = vec![0.1, 0.2, 0.3, 0.15, 0.25];
        let a = fast.multiply(&x).unwrap();
        let b = manual.multiply(&x).unwrap();
        for (u, v) in a.iter().zip(&b) {
            assert!((u - v).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_column_sum_out_of_range_panics() {
        let m = SprsMatrix::from_edges(&edges(&[(0, 1)]));
        m.column_sum(2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let m = SprsMatrix::from_edges(&edges(&[(0, 1)]));
        assert!(m.multiply(&[1.0]).is_err());
    }
}
