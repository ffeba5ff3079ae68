//! Edge-list readers
//!
//! Two text encodings are supported, both normalized to `(source, target)`
//! pairs before they reach [`EdgeList`]:
//!
//! - **SNAP**: a fixed number of header lines, then `source target` per line
//!   separated by whitespace. Later `#` comment lines and blank lines are skipped.
//! - **Tagged**: only lines whose first token is `e` carry an edge, as
//!   `e source target`; every other line is ignored.
//!
//! Input is read in batches of [`CHUNK_LINES`] lines; batches of at least
//! [`PARALLEL_THRESHOLD`] lines are parsed on the rayon pool.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::graph::edges::EdgeList;
use crate::types::{Edge, NodeId};

/// Header lines in a SNAP edge list such as `web-Google.txt`.
pub const SNAP_HEADER_LINES: usize = 4;

/// Below this many lines, sequential parsing is faster.
pub const PARALLEL_THRESHOLD: usize = 100_000;

/// Lines held in memory at once while reading.
pub const CHUNK_LINES: usize = 4 * PARALLEL_THRESHOLD;

/// Text encoding of an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFormat {
    /// Whitespace-separated `source target`, after `header_lines` skipped lines.
    Snap { header_lines: usize },
    /// `e source target` records mixed with other lines.
    Tagged,
}

impl Default for EdgeFormat {
    fn default() -> Self {
        Self::Snap {
            header_lines: SNAP_HEADER_LINES,
        }
    }
}

impl EdgeFormat {
    /// Parse one line. `line_no` is 1-based and only used for errors.
    ///
    /// Returns `Ok(None)` for lines that carry no edge.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<Edge>> {
        let mut tokens = line.split_whitespace();
        match self {
            Self::Snap { header_lines } => {
                if line_no <= *header_lines {
                    return Ok(None);
                }
                let first = match tokens.next() {
                    None => return Ok(None),
                    Some(t) if t.starts_with('#') => return Ok(None),
                    Some(t) => t,
                };
                let second = tokens
                    .next()
                    .ok_or_else(|| Error::malformed(line_no, "expected a target after the source"))?;
                Ok(Some(Edge::new(
                    parse_node(first, line_no)?,
                    parse_node(second, line_no)?,
                )))
            }
            Self::Tagged => {
                if tokens.next() != Some("e") {
                    return Ok(None);
                }
                let (Some(source), Some(target)) = (tokens.next(), tokens.next()) else {
                    return Err(Error::malformed(
                        line_no,
                        "edge record needs `e <source> <target>`",
                    ));
                };
                Ok(Some(Edge::new(
                    parse_node(source, line_no)?,
                    parse_node(target, line_no)?,
                )))
            }
        }
    }
}

fn parse_node(token: &str, line_no: usize) -> Result<NodeId> {
    token
        .parse::<NodeId>()
        .map_err(|e| Error::malformed(line_no, format!("invalid node index {token:?}: {e}")))
}

/// Parse every line of `reader`, [`CHUNK_LINES`] lines at a time.
///
/// Lines that are not valid UTF-8 are malformed records. On error the
/// reported record is always the earliest bad line.
pub fn read_edges<R: BufRead>(reader: R, format: EdgeFormat) -> Result<EdgeList> {
    let mut edges = Vec::new();
    let mut chunk: Vec<Vec<u8>> = Vec::with_capacity(CHUNK_LINES);
    let mut first_line = 1;

    for raw in reader.split(b'\n') {
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        chunk.push(raw);
        if chunk.len() == CHUNK_LINES {
            parse_chunk(&chunk, first_line, format, &mut edges)?;
            first_line += chunk.len();
            chunk.clear();
        }
    }
    parse_chunk(&chunk, first_line, format, &mut edges)?;

    Ok(finish(edges, first_line - 1 + chunk.len()))
}

/// Open and parse an edge-list file.
pub fn read_edges_file(path: impl AsRef<Path>, format: EdgeFormat) -> Result<EdgeList> {
    let file = File::open(path.as_ref())?;
    read_edges(BufReader::new(file), format)
}

/// Parse pre-split lines, in parallel for large inputs.
pub fn parse_lines<S: AsRef<[u8]> + Sync>(lines: &[S], format: EdgeFormat) -> Result<EdgeList> {
    let mut edges = Vec::new();
    for (k, chunk) in lines.chunks(CHUNK_LINES).enumerate() {
        parse_chunk(chunk, k * CHUNK_LINES + 1, format, &mut edges)?;
    }
    Ok(finish(edges, lines.len()))
}

/// Parse one batch of lines numbered from `first_line` and append its edges.
fn parse_chunk<S: AsRef<[u8]> + Sync>(
    lines: &[S],
    first_line: usize,
    format: EdgeFormat,
    edges: &mut Vec<Edge>,
) -> Result<()> {
    if lines.len() < PARALLEL_THRESHOLD {
        for (i, raw) in lines.iter().enumerate() {
            if let Some(edge) = parse_raw(format, raw.as_ref(), first_line + i)? {
                edges.push(edge);
            }
        }
        return Ok(());
    }

    let parsed: Vec<Result<Option<Edge>>> = lines
        .par_iter()
        .enumerate()
        .map(|(i, raw)| parse_raw(format, raw.as_ref(), first_line + i))
        .collect();
    // Walk in line order so the earliest bad line wins.
    for result in parsed {
        if let Some(edge) = result? {
            edges.push(edge);
        }
    }
    Ok(())
}

fn parse_raw(format: EdgeFormat, raw: &[u8], line_no: usize) -> Result<Option<Edge>> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| Error::malformed(line_no, format!("invalid UTF-8: {e}")))?;
    format.parse_line(line, line_no)
}

fn finish(edges: Vec<Edge>, lines: usize) -> EdgeList {
    let edges = EdgeList::from_edges(edges);
    debug!(
        "parsed {} edge(s) over {} node(s) from {} line(s)",
        edges.len(),
        edges.num_nodes(),
        lines
    );
    edges
}
