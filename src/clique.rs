//! Exact maximum-clique search by depth-first branch-and-bound backtracking.
//!
//! Two vertices are compatible when an arc exists between them in either
//! direction, so the directed structure stands in for an undirected
//! compatibility relation. The search walks the ascending vertex enumeration
//! with an explicit incumbent accumulator; a candidate only replaces the
//! incumbent when strictly larger, so ties go to the first clique reached.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::graph::{VertexId, WeightedDigraph};

impl WeightedDigraph {
    /// Returns a maximum clique under either-direction adjacency, in
    /// ascending vertex order.
    ///
    /// Among equally sized maximum cliques the first one reached in
    /// enumeration order wins. The search is worst-case exponential; callers
    /// needing bounded latency should use
    /// [`find_max_clique_until`](WeightedDigraph::find_max_clique_until).
    pub fn find_max_clique(&self) -> Vec<VertexId> {
        self.search_max_clique(None)
    }

    /// Like [`find_max_clique`](WeightedDigraph::find_max_clique), but checks
    /// `stop` cooperatively at every search node and unwinds once it is set,
    /// returning the best clique found so far. The result is only guaranteed
    /// to be maximum if the search ran to completion.
    pub fn find_max_clique_until(&self, stop: &AtomicBool) -> Vec<VertexId> {
        self.search_max_clique(Some(stop))
    }

    fn search_max_clique(&self, stop: Option<&AtomicBool>) -> Vec<VertexId> {
        let order: Vec<VertexId> = self.vertices().collect();
        let mut current = Vec::new();
        let mut best = Vec::new();
        self.extend_clique(&order, 0, &mut current, &mut best, stop);
        log::debug!(
            "max clique search over {} vertices found size {}",
            order.len(),
            best.len()
        );
        best
    }

    fn extend_clique(
        &self,
        order: &[VertexId],
        start: usize,
        current: &mut Vec<VertexId>,
        best: &mut Vec<VertexId>,
        stop: Option<&AtomicBool>,
    ) {
        if let Some(flag) = stop {
            if flag.load(Ordering::Relaxed) {
                return;
            }
        }
        if current.len() > best.len() {
            best.clear();
            best.extend_from_slice(current);
            log::trace!("incumbent clique grew to size {}", best.len());
        }

        for index in start..order.len() {
            // Taking every remaining vertex could at best tie the incumbent,
            // and ties never replace it.
            if current.len() + (order.len() - index) <= best.len() {
                break;
            }
            let candidate = order[index];
            if current.iter().all(|&member| self.are_linked(member, candidate)) {
                current.push(candidate);
                self.extend_clique(order, index + 1, current, best, stop);
                current.pop();
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
