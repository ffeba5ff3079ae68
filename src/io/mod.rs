//! I/O boundary: edge-list readers, rank-vector files, and GEXF export.
//!
//! Nothing in here participates in the ranking computation itself.

pub mod edges;
pub mod gexf;
pub mod vector;

pub use edges::{read_edges, read_edges_file, EdgeFormat};
pub use gexf::{export_gexf_file, GexfOptions};
pub use vector::{read_vector_file, write_vector, write_vector_file};
