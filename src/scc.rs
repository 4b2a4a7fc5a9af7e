//! Strongly connected components via Kosaraju's two-pass algorithm.
//!
//! Pass 1 runs a post-order depth-first search over the transposed graph and
//! records vertices in finishing order; pass 2 pops that order and floods the
//! original graph, emitting one component per unvisited pop. Which graph
//! feeds which pass is load-bearing: swapping them breaks correctness.
//!
//! Both passes use an explicit stack so recursion depth never tracks the
//! graph diameter; traversal and finishing order match the recursive
//! formulation exactly.

use std::collections::HashMap;

use crate::graph::{VertexId, WeightedDigraph};

impl WeightedDigraph {
    /// Decomposes the graph into strongly connected components.
    ///
    /// Every vertex appears in exactly one returned component; a vertex that
    /// participates in no cycle forms a singleton. The empty graph yields an
    /// empty list, and an edgeless graph one singleton per vertex.
    /// Components are emitted in finishing-stack pop order, which is
    /// deterministic, but only membership is contractual.
    pub fn kosaraju(&self) -> Vec<Vec<VertexId>> {
        let order: Vec<VertexId> = self.vertices().collect();
        let n = order.len();
        if n == 0 {
            return Vec::new();
        }
        let positions: HashMap<VertexId, usize> = order
            .iter()
            .enumerate()
            .map(|(index, &vertex)| (vertex, index))
            .collect();

        // Pass 1: finishing-order stack built on the transposed graph. The
        // transpose preserves the vertex set, so both graphs share one
        // position map and their dense indices line up.
        let reversed = index_adjacency(&self.transpose(), &positions);
        let mut finish = Vec::with_capacity(n);
        let mut seen = vec![false; n];
        for start in 0..n {
            if !seen[start] {
                dfs_postorder(&reversed, start, &mut seen, &mut finish);
            }
        }

        // Pass 2: pop the stack and flood the original graph. Each DFS call
        // from an unvisited vertex collects exactly one component.
        let forward = index_adjacency(self, &positions);
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        for &start in finish.iter().rev() {
            if seen[start] {
                continue;
            }
            let mut members = Vec::new();
            dfs_postorder(&forward, start, &mut seen, &mut members);
            components.push(members.into_iter().map(|index| order[index]).collect());
        }

        log::debug!(
            "kosaraju: {} vertices decomposed into {} components",
            n,
            components.len()
        );
        components
    }
}

/// Re-expresses a graph's adjacency over dense position indices, dropping
/// weights. Arc heads are guaranteed vertices by `add_edge`, so the position
/// lookups are total.
fn index_adjacency(
    graph: &WeightedDigraph,
    positions: &HashMap<VertexId, usize>,
) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); positions.len()];
    for vertex in graph.vertices() {
        let index = positions[&vertex];
        if let Some(bucket) = graph.edges_from(vertex) {
            for edge in bucket {
                adjacency[index].push(positions[&edge.to]);
            }
        }
    }
    adjacency
}

/// Iterative depth-first search from `start`, appending each vertex to
/// `order` only after all of its unvisited descendants are exhausted
/// (post-order). Vertices are marked when first reached, exactly as the
/// recursive version marks them on entry.
fn dfs_postorder(adjacency: &[Vec<usize>], start: usize, seen: &mut [bool], order: &mut Vec<usize>) {
    debug_assert!(!seen[start]);
    seen[start] = true;
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, next) = *frame;
        if let Some(&target) = adjacency[vertex].get(next) {
            frame.1 = next + 1;
            if !seen[target] {
                seen[target] = true;
                stack.push((target, 0));
            }
        } else {
            order.push(vertex);
            stack.pop();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn graph_from_arcs(vertices: &[VertexId], arcs: &[(VertexId, VertexId)]) -> WeightedDigraph {
        let mut graph = WeightedDigraph::new();
        for &vertex in vertices {
            graph.add_vertex(vertex);
        }
        for &(from, to) in arcs {
            graph.add_edge(from, to, 1.0).unwrap();
        }
        graph
    }

    fn random_digraph<R: Rng>(rng: &mut R, n: u32, arc_probability: f64) -> WeightedDigraph {
        let mut graph = WeightedDigraph::new();
        for vertex in 0..n {
            graph.add_vertex(vertex);
        }
        for from in 0..n {
            for to in 0..n {
                if from != to && rng.random_bool(arc_probability) {
                    graph.add_edge(from, to, 1.0).unwrap();
                }
            }
        }
        graph
    }

    /// Boolean transitive closure by repeated squaring-free fixed point
    /// (Floyd-Warshall style), used as the mutual-reachability ground truth.
    fn reachability(graph: &WeightedDigraph) -> Vec<Vec<bool>> {
        let order: Vec<VertexId> = graph.vertices().collect();
        let n = order.len();
        let positions: HashMap<VertexId, usize> = order
            .iter()
            .enumerate()
            .map(|(index, &vertex)| (vertex, index))
            .collect();

        let mut reach = vec![vec![false; n]; n];
        for i in 0..n {
            reach[i][i] = true;
        }
        for (from, edge) in graph.edges() {
            reach[positions[&from]][positions[&edge.to]] = true;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if reach[i][k] && reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach
    }

    fn component_of(components: &[Vec<VertexId>], vertex: VertexId) -> usize {
        components
            .iter()
            .position(|component| component.contains(&vertex))
            .expect("vertex missing from every component")
    }

    #[test]
    fn empty_graph_has_no_components() {
        let graph = WeightedDigraph::new();
        assert!(graph.kosaraju().is_empty());
    }

    #[test]
    fn edgeless_graph_yields_singletons() {
        let graph = graph_from_arcs(&[0, 1, 2, 3], &[]);
        let components = graph.kosaraju();
        assert_eq!(components.len(), 4);
        for component in &components {
            assert_eq!(component.len(), 1);
        }
    }

    #[test]
    fn directed_cycle_is_one_component() {
        let graph = graph_from_arcs(&[0, 1, 2], &[(0, 1), (1, 2), (2, 0)]);
        let components = graph.kosaraju();
        assert_eq!(components.len(), 1);
        let mut members = components[0].clone();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2]);
    }

    #[test]
    fn chain_splits_into_singletons() {
        let graph = graph_from_arcs(&[0, 1, 2], &[(0, 1), (1, 2)]);
        assert_eq!(graph.kosaraju().len(), 3);
    }

    #[test]
    fn self_loop_stays_a_singleton() {
        let graph = graph_from_arcs(&[5, 8], &[(5, 5), (5, 8)]);
        assert_eq!(graph.kosaraju().len(), 2);
    }

    #[test]
    fn sparse_handles_are_supported() {
        let graph = graph_from_arcs(&[10, 40, 99], &[(10, 40), (40, 10), (99, 10)]);
        let components = graph.kosaraju();
        assert_eq!(components.len(), 2);
        assert_eq!(
            component_of(&components, 10),
            component_of(&components, 40)
        );
        assert_ne!(
            component_of(&components, 10),
            component_of(&components, 99)
        );
    }

    #[test]
    fn reference_graph_components() {
        let mut graph = WeightedDigraph::new();
        for vertex in 0..5 {
            graph.add_vertex(vertex);
        }
        graph.add_edge(0, 2, 5.0).unwrap();
        graph.add_edge(1, 0, 4.0).unwrap();
        graph.add_edge(2, 1, 1.0).unwrap();
        graph.add_edge(3, 1, 5.0).unwrap();
        graph.add_edge(3, 4, 1.0).unwrap();
        graph.add_edge(4, 3, 11.0).unwrap();

        // Emission order may vary; membership must be {0,1,2} and {3,4}.
        let components = graph.kosaraju();
        assert_eq!(components.len(), 2);
        let mut sorted: Vec<Vec<VertexId>> = components
            .into_iter()
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect();
        sorted.sort();
        assert_eq!(sorted, vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn components_partition_the_vertex_set() {
        let mut rng = XorShiftRng::seed_from_u64(0x5CC0);
        for _ in 0..60 {
            let n = rng.random_range(0..=10);
            let graph = random_digraph(&mut rng, n, 0.25);
            let components = graph.kosaraju();

            let mut covered: Vec<VertexId> = components.concat();
            covered.sort_unstable();
            covered.dedup();
            assert_eq!(covered.len() as u32, n, "a vertex was omitted or duplicated");
            let expected: Vec<VertexId> = graph.vertices().collect();
            assert_eq!(covered, expected);
        }
    }

    #[test]
    fn components_match_mutual_reachability() {
        let mut rng = XorShiftRng::seed_from_u64(0xD1A6);
        for _ in 0..60 {
            let n = rng.random_range(1..=9);
            let graph = random_digraph(&mut rng, n, 0.3);
            let components = graph.kosaraju();
            let reach = reachability(&graph);

            for u in 0..n as usize {
                for v in 0..n as usize {
                    let mutually_reachable = reach[u][v] && reach[v][u];
                    let same_component = component_of(&components, u as VertexId)
                        == component_of(&components, v as VertexId);
                    assert_eq!(
                        mutually_reachable, same_component,
                        "vertices {u} and {v} disagree with the reachability oracle"
                    );
                }
            }
        }
    }

    #[test]
    fn analysis_is_idempotent_and_non_mutating() {
        let mut rng = XorShiftRng::seed_from_u64(0x1DE0);
        let graph = random_digraph(&mut rng, 8, 0.3);
        let snapshot = graph.clone();

        let first = graph.kosaraju();
        let second = graph.kosaraju();
        assert_eq!(first, second);
        assert_eq!(graph, snapshot);
    }
}
