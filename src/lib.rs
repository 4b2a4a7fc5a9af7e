//! # flowgraph
//!
//! Analysis of directed, edge-weighted graphs.
//!
//! This crate provides:
//! - An adjacency-list digraph with explicit vertex handles, real-valued
//!   weights, and support for parallel arcs and self-loops.
//! - Graph transposition.
//! - Strongly-connected-component decomposition (Kosaraju's two-pass
//!   algorithm, iterative DFS).
//! - Maximum flow (Edmonds-Karp over a dense residual matrix).
//! - Exact maximum-clique search (branch-and-bound backtracking over an
//!   either-direction adjacency relation), with a cooperative stop flag for
//!   callers that need bounded latency.
//!
//! ## Quick Start
//!
//! ```
//! use flowgraph::graph::WeightedDigraph;
//!
//! let mut graph = WeightedDigraph::new();
//! for vertex in 0..3 {
//!     graph.add_vertex(vertex);
//! }
//! graph.add_edge(0, 1, 2.0).expect("endpoints exist");
//! graph.add_edge(1, 2, 1.0).expect("endpoints exist");
//! graph.add_edge(2, 0, 4.0).expect("endpoints exist");
//!
//! // The cycle is one strongly connected component.
//! assert_eq!(graph.kosaraju().len(), 1);
//!
//! // Flow from 0 to 2 is limited by the 1 -> 2 arc.
//! assert_eq!(graph.max_flow(0, 2).expect("valid endpoints"), 1.0);
//!
//! // Every pair is joined by an arc in some direction.
//! assert_eq!(graph.find_max_clique(), vec![0, 1, 2]);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Data model, mutation API, transpose, and the dense weight
//!   matrix. The analyses attach to [`graph::WeightedDigraph`] from the
//!   other modules.
//!
//! ## Determinism
//!
//! Every operation is single-threaded, synchronous, and reads the graph
//! immutably; vertex enumeration is ascending by handle, so repeated
//! analyses on an unmutated graph return identical results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error sections are written where non-obvious
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing

pub mod graph;

mod clique;
mod flow;
mod scc;

/// Re-export of the public surface for convenience.
pub mod prelude {
    pub use crate::graph::{Edge, GraphError, VertexId, WeightedDigraph};
}
