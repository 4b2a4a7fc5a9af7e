//! Directed weighted graph data model: adjacency storage, mutation,
//! transposition, and the dense weight matrix consumed by the flow analysis.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// Integer handle identifying a vertex, unique within a graph.
pub type VertexId = u32;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced by graph mutation and analysis operations.
///
/// Everything in this crate is a deterministic pure computation over in-memory
/// state, so a failed call fails identically on retry. Callers should treat
/// any of these as fatal to the requested computation; there are no partial
/// or degraded results.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    /// An operation referenced a vertex that was never added to the graph.
    #[error("vertex {0} does not exist in the graph")]
    UnknownVertex(VertexId),

    /// A flow computation was requested on a graph containing a negative
    /// edge weight. The flow algorithm assumes non-negative capacities, so
    /// such input is rejected instead of silently producing a wrong answer.
    #[error("edge {from} -> {to} has negative weight {weight}; flow capacities must be non-negative")]
    NegativeCapacity {
        /// Tail of the offending edge.
        from: VertexId,
        /// Head of the offending edge.
        to: VertexId,
        /// The negative weight.
        weight: f64,
    },

    /// The adjacency storage lost track of a known vertex. This indicates a
    /// bug in a mutation path; correct use of the public API cannot trigger it.
    #[error("internal adjacency inconsistency: {0}")]
    Inconsistent(String),
}

// ============================================================================
// Edge
// ============================================================================

/// A directed arc stored in the outgoing bucket of its tail vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Head of the arc.
    pub to: VertexId,
    /// Arc weight. Opaque to the graph itself; the flow analysis reads it
    /// as a capacity.
    pub weight: f64,
}

// ============================================================================
// WeightedDigraph
// ============================================================================

/// An adjacency-list directed graph with real-valued edge weights.
///
/// The vertex set is exactly the key set of the adjacency map. Vertices must
/// be added before edges reference them; parallel arcs and self-loops are
/// legal and each inserted arc is retained independently. There are no
/// deletion operations: a graph is built once and then queried.
///
/// All vertex enumeration (iteration, matrix indexing, search ordering in the
/// analyses) uses ascending handle order, so every analysis is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedDigraph {
    adjacency: BTreeMap<VertexId, Vec<Edge>>,
}

impl WeightedDigraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with an empty outgoing bucket.
    ///
    /// Idempotent: returns `true` if the vertex was newly inserted and
    /// `false` if it was already present (in which case its edges are kept).
    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        match self.adjacency.entry(vertex) {
            Entry::Vacant(slot) => {
                slot.insert(Vec::new());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Appends a directed arc `from -> to` with the given weight.
    ///
    /// Self-loops and parallel arcs are permitted; nothing is deduplicated.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if either endpoint has not been added.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Result<(), GraphError> {
        if !self.adjacency.contains_key(&to) {
            return Err(GraphError::UnknownVertex(to));
        }
        let bucket = self
            .adjacency
            .get_mut(&from)
            .ok_or(GraphError::UnknownVertex(from))?;
        bucket.push(Edge { to, weight });
        Ok(())
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of arcs, counting parallel arcs individually.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns `true` if `vertex` belongs to the graph.
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    /// Iterates over vertex handles in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Returns the outgoing arcs of `vertex` in insertion order, or `None`
    /// if the vertex does not exist.
    pub fn edges_from(&self, vertex: VertexId) -> Option<&[Edge]> {
        self.adjacency.get(&vertex).map(Vec::as_slice)
    }

    /// Iterates over every arc as `(from, edge)`, tails in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, &Edge)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&from, bucket)| bucket.iter().map(move |edge| (from, edge)))
    }

    /// Returns `true` if at least one arc `from -> to` exists.
    pub fn has_arc(&self, from: VertexId, to: VertexId) -> bool {
        self.edges_from(from)
            .is_some_and(|bucket| bucket.iter().any(|edge| edge.to == to))
    }

    /// Returns `true` if an arc exists between `u` and `v` in either
    /// direction. This is the undirected compatibility relation the clique
    /// search runs on; it is meaningful for distinct vertices.
    pub fn are_linked(&self, u: VertexId, v: VertexId) -> bool {
        self.has_arc(u, v) || self.has_arc(v, u)
    }

    /// Returns a new independent graph with the same vertex set and every
    /// arc reversed, weights preserved.
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::new();
        for vertex in self.vertices() {
            transposed.add_vertex(vertex);
        }
        for (&from, bucket) in &self.adjacency {
            for edge in bucket {
                // `edge.to` is guaranteed to be a vertex by `add_edge`, so
                // this never creates a key outside the copied vertex set.
                transposed.adjacency.entry(edge.to).or_default().push(Edge {
                    to: from,
                    weight: edge.weight,
                });
            }
        }
        transposed
    }

    /// Builds the dense N x N weight matrix.
    ///
    /// Row and column indices are vertex positions in ascending handle order,
    /// so sparse or non-contiguous handles are mapped correctly. Pairs with
    /// no arc hold 0; for parallel arcs the last-inserted weight wins.
    ///
    /// # Errors
    /// [`GraphError::Inconsistent`] if an arc references a handle missing
    /// from the vertex set, which the mutation API makes impossible.
    pub fn weight_matrix(&self) -> Result<Vec<Vec<f64>>, GraphError> {
        let positions: HashMap<VertexId, usize> = self
            .vertices()
            .enumerate()
            .map(|(index, vertex)| (vertex, index))
            .collect();
        let n = positions.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (row, (&vertex, bucket)) in self.adjacency.iter().enumerate() {
            for edge in bucket {
                let column = *positions.get(&edge.to).ok_or_else(|| {
                    GraphError::Inconsistent(format!(
                        "arc {vertex} -> {} targets a handle outside the vertex set",
                        edge.to
                    ))
                })?;
                matrix[row][column] = edge.weight;
            }
        }
        Ok(matrix)
    }
}

// ============================================================================
// Tests
// ============================================================================
