//! GEXF subgraph export for graph viewers such as Gephi.
//!
//! Whole web graphs are far too large to draw, so the export keeps a bounded
//! node sample: distinct nodes are taken in edge order until `max_nodes` is
//! reached, each carrying a `size` attribute equal to its rank times `scale`.
//! Every edge whose endpoints were both sampled is emitted once.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::{ensure_dim, Result};
use crate::graph::edges::EdgeList;
use crate::types::NodeId;

pub const DEFAULT_MAX_NODES: usize = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct GexfOptions {
    /// Upper bound on exported nodes
    pub max_nodes: usize,
    /// Multiplier applied to each rank before it becomes the node size
    pub scale: f64,
}

impl Default for GexfOptions {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            scale: 1.0,
        }
    }
}

impl GexfOptions {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// The nodes and edges chosen for export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subgraph {
    /// `(node, size)` in first-seen order
    pub nodes: Vec<(NodeId, f64)>,
    /// Distinct `(source, target)` links between selected nodes, in edge order
    pub edges: Vec<(NodeId, NodeId)>,
}

/// Pick the bounded subgraph described in the module docs.
pub fn select_subgraph(edges: &EdgeList, scores: &[f64], options: &GexfOptions) -> Result<Subgraph> {
    ensure_dim(edges.num_nodes(), scores.len())?;

    let mut selected = FxHashSet::default();
    let mut subgraph = Subgraph::default();

    for edge in edges {
        if selected.len() >= options.max_nodes {
            break;
        }
        for node in [edge.source, edge.target] {
            if selected.len() < options.max_nodes && selected.insert(node) {
                subgraph
                    .nodes
                    .push((node, scores[node as usize] * options.scale));
            }
        }
    }

    let mut seen = FxHashSet::default();
    for edge in edges {
        if selected.contains(&edge.source)
            && selected.contains(&edge.target)
            && seen.insert((edge.source, edge.target))
        {
            subgraph.edges.push((edge.source, edge.target));
        }
    }

    Ok(subgraph)
}

/// Serialize a subgraph as a directed GEXF 1.2 document.
pub fn write_gexf<W: Write>(mut writer: W, subgraph: &Subgraph) -> Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#
    )?;
    writeln!(writer, r#"  <graph mode="static" defaultedgetype="directed">"#)?;
    writeln!(writer, r#"    <attributes class="node" mode="static">"#)?;
    writeln!(writer, r#"      <attribute id="0" title="size" type="double"/>"#)?;
    writeln!(writer, "    </attributes>")?;

    writeln!(writer, "    <nodes>")?;
    for &(node, size) in &subgraph.nodes {
        writeln!(writer, r#"      <node id="{node}" label="{node}">"#)?;
        writeln!(
            writer,
            r#"        <attvalues><attvalue for="0" value="{size}"/></attvalues>"#
        )?;
        writeln!(writer, "      </node>")?;
    }
    writeln!(writer, "    </nodes>")?;

    writeln!(writer, "    <edges>")?;
    for (id, &(source, target)) in subgraph.edges.iter().enumerate() {
        writeln!(
            writer,
            r#"      <edge id="{id}" source="{source}" target="{target}"/>"#
        )?;
    }
    writeln!(writer, "    </edges>")?;
    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</gexf>")?;
    writer.flush()?;
    Ok(())
}

/// Select and write a subgraph to `path`.
pub fn export_gexf_file(
    path: impl AsRef<Path>,
    edges: &EdgeList,
    scores: &[f64],
    options: &GexfOptions,
) -> Result<Subgraph> {
    let subgraph = select_subgraph(edges, scores, options)?;
    let file = File::create(path.as_ref())?;
    write_gexf(BufWriter::new(file), &subgraph)?;
    Ok(subgraph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (EdgeList, Vec<f64>) {
        let edges = EdgeList::from_pairs([(3, 1), (1, 2), (2, 3), (0, 3), (3, 1)]).unwrap();
        (edges, vec![0.1, 0.2, 0.3, 0.4])
    }

    #[test]
    fn test_nodes_in_edge_order() {
        let (edges, scores) = sample();
        let sub = select_subgraph(&edges, &scores, &GexfOptions::default()).unwrap();
        let ids: Vec<_> = sub.nodes.iter().map(|(n, _)| *n).collect();
        assert_eq!(ids, vec![3, 1, 2, 0]);
        assert_eq!(sub.nodes[0].1, 0.4);
        // Duplicate 3 -> 1 emitted once
        assert_eq!(sub.edges, vec![(3, 1), (1, 2), (2, 3), (0, 3)]);
    }

    #[test]
    fn test_node_cap_and_edge_filter() {
        let (edges, scores) = sample();
        let options = GexfOptions::default().with_max_nodes(2);
        let sub = select_subgraph(&edges, &scores, &options).unwrap();
        assert_eq!(sub.nodes.len(), 2);
        assert_eq!(sub.edges, vec![(3, 1)]);
    }

    #[test]
    fn test_scale_applied() {
        let (edges, scores) = sample();
        let options = GexfOptions::default().with_scale(100_000.0);
        let sub = select_subgraph(&edges, &scores, &options).unwrap();
        assert!((sub.nodes[0].1 - 40_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_length_checked() {
        let (edges, _) = sample();
        assert!(select_subgraph(&edges, &[0.5], &GexfOptions::default()).is_err());
    }

    #[test]
    fn test_write_gexf_document() {
        let (edges, scores) = sample();
        let sub = select_subgraph(&edges, &scores, &GexfOptions::default()).unwrap();
        let mut buf = Vec::new();
        write_gexf(&mut buf, &sub).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.contains(r#"defaultedgetype="directed""#));
        assert!(xml.contains(r#"<node id="3" label="3">"#));
        assert!(xml.contains(r#"<attvalue for="0" value="0.4"/>"#));
        assert!(xml.contains(r#"<edge id="3" source="0" target="3"/>"#));
        assert_eq!(xml.matches("<edge ").count(), 4);
    }
}
