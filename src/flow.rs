//! Maximum flow via Edmonds-Karp: shortest augmenting paths found by
//! breadth-first search over a dense residual capacity matrix.
//!
//! The graph's weight matrix is rebuilt on every query; vertex handles are
//! mapped to dense matrix positions through the ascending enumeration, never
//! used as indices directly.

use std::collections::VecDeque;

use crate::graph::{GraphError, VertexId, WeightedDigraph};

/// Sentinel parent index for vertices the current search has not reached.
const UNVISITED: usize = usize::MAX;

impl WeightedDigraph {
    /// Computes the maximum flow from `source` to `sink`, reading edge
    /// weights as capacities.
    ///
    /// Pairs with no arc have zero capacity and admit no flow, so a
    /// disconnected source/sink pair yields 0. `source == sink` yields 0 by
    /// convention (there is no augmenting path to look for, and defining it
    /// avoids a degenerate search). Pushing flow along a path also decrements
    /// the reverse direction, so a later path can cancel flow routed through
    /// an earlier, ultimately suboptimal choice.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if either endpoint is absent, and
    /// [`GraphError::NegativeCapacity`] if any edge weight is negative
    /// (the algorithm assumes non-negative capacities).
    pub fn max_flow(&self, source: VertexId, sink: VertexId) -> Result<f64, GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::UnknownVertex(source));
        }
        if !self.contains_vertex(sink) {
            return Err(GraphError::UnknownVertex(sink));
        }
        if let Some((from, edge)) = self.edges().find(|(_, edge)| edge.weight < 0.0) {
            return Err(GraphError::NegativeCapacity {
                from,
                to: edge.to,
                weight: edge.weight,
            });
        }
        if source == sink {
            return Ok(0.0);
        }

        let capacity = self.weight_matrix()?;
        let n = capacity.len();
        let position = |vertex: VertexId| {
            self.vertices().position(|candidate| candidate == vertex).ok_or_else(|| {
                GraphError::Inconsistent(format!("vertex {vertex} vanished from the enumeration"))
            })
        };
        let s = position(source)?;
        let t = position(sink)?;

        let mut flow = vec![vec![0.0f64; n]; n];
        let mut total = 0.0f64;
        let mut rounds = 0u64;

        loop {
            // Breadth-first search over strictly positive residuals; the
            // first time the sink is labelled, the parent chain holds a
            // fewest-edges augmenting path.
            let mut parent = vec![UNVISITED; n];
            parent[s] = s;
            let mut queue = VecDeque::new();
            queue.push_back(s);

            'bfs: while let Some(u) = queue.pop_front() {
                for v in 0..n {
                    if parent[v] == UNVISITED && capacity[u][v] - flow[u][v] > 0.0 {
                        parent[v] = u;
                        if v == t {
                            break 'bfs;
                        }
                        queue.push_back(v);
                    }
                }
            }
            if parent[t] == UNVISITED {
                break;
            }

            // Bottleneck residual along the found path.
            let mut path_flow = f64::INFINITY;
            let mut v = t;
            while v != s {
                let u = parent[v];
                path_flow = path_flow.min(capacity[u][v] - flow[u][v]);
                v = u;
            }

            // Push the bottleneck along the path, crediting the reverse
            // direction so earlier routing decisions stay cancellable.
            let mut v = t;
            while v != s {
                let u = parent[v];
                flow[u][v] += path_flow;
                flow[v][u] -= path_flow;
                v = u;
            }

            total += path_flow;
            rounds += 1;
            log::trace!("augmenting path {rounds}: bottleneck {path_flow}, running total {total}");
        }

        log::debug!("max_flow {source} -> {sink}: {total} after {rounds} augmenting rounds");
        Ok(total)
    }
}

// ============================================================================
// Tests
// ============================================================================
