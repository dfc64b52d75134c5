use crate::domain::graph::{DirectedGraph, SccResult};
use crate::domain::traits::SccDecomposer;
use tracing::debug;

/// Two-pass Kosaraju decomposition.
///
/// Pass 1 computes a finish order over the transposed graph; pass 2 harvests
/// one component per fresh DFS tree over the original graph, scanning that
/// finish order front to back. Components therefore come out sink-first
/// (reverse topological order of the condensation).
pub struct KosarajuSccDecomposer;

impl SccDecomposer for KosarajuSccDecomposer {
    fn decompose(&self, graph: &DirectedGraph) -> SccResult {
        kosaraju_scc(graph)
    }
}

/// Visitation set for a single pass. Dropped when the pass returns.
struct VisitState {
    visited: Vec<bool>,
}

impl VisitState {
    fn new(node_count: usize) -> Self {
        Self {
            visited: vec![false; node_count],
        }
    }

    /// Marks `v` visited, returning false if it already was.
    fn claim(&mut self, v: usize) -> bool {
        !std::mem::replace(&mut self.visited[v], true)
    }
}

fn kosaraju_scc(graph: &DirectedGraph) -> SccResult {
    let n = graph.node_count();
    let transposed = graph.transpose();

    let order = finish_order(&transposed);
    debug!(nodes = n, "finish order computed");

    let components = harvest_components(graph, &order);
    debug!(
        nodes = n,
        components = components.len(),
        "components harvested"
    );

    SccResult::from_components(graph, components)
}

/// Reversed post-order over all nodes, outer scan in increasing index order.
fn finish_order(graph: &DirectedGraph) -> Vec<usize> {
    let n = graph.node_count();
    let mut state = VisitState::new(n);
    let mut order: Vec<usize> = Vec::with_capacity(n);

    for start in 0..n {
        if !state.claim(start) {
            continue;
        }
        post_order_from(graph, start, &mut state, &mut order);
    }

    order.reverse();
    order
}

fn harvest_components(graph: &DirectedGraph, order: &[usize]) -> Vec<Vec<usize>> {
    let mut state = VisitState::new(graph.node_count());
    let mut components: Vec<Vec<usize>> = Vec::new();

    for &v in order {
        if !state.claim(v) {
            continue;
        }
        let mut comp = Vec::new();
        post_order_from(graph, v, &mut state, &mut comp);
        comp.reverse();
        components.push(comp);
    }

    components
}

/// Iterative DFS from an already-claimed `start`, appending nodes as they finish.
///
/// Frames are `(node, next neighbour cursor)`; neighbours are tried in
/// adjacency order, so the output matches the recursive formulation.
fn post_order_from(
    graph: &DirectedGraph,
    start: usize,
    state: &mut VisitState,
    out: &mut Vec<usize>,
) {
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (v, next_i) = *frame;
        let outs = graph.neighbours(v);

        if next_i < outs.len() {
            frame.1 += 1;
            let to = outs[next_i];
            if state.claim(to) {
                stack.push((to, 0));
            }
            continue;
        }

        stack.pop();
        out.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: i64, edges: &[(i64, i64)]) -> DirectedGraph {
        DirectedGraph::from_edge_list(n, edges.iter().copied()).expect("graph")
    }

    #[test]
    fn finish_order_puts_later_finishers_first() {
        // 0 -> 1 -> 2, 3 isolated
        let g = graph(4, &[(0, 1), (1, 2)]);
        assert_eq!(finish_order(&g), vec![3, 0, 1, 2]);
    }

    #[test]
    fn finish_order_follows_adjacency_order() {
        let g = graph(3, &[(0, 2), (0, 1)]);
        assert_eq!(finish_order(&g), vec![0, 1, 2]);

        let g = graph(3, &[(0, 1), (0, 2)]);
        assert_eq!(finish_order(&g), vec![0, 2, 1]);
    }

    #[test]
    fn finish_order_covers_every_node_once() {
        let g = graph(5, &[(4, 0), (0, 4), (2, 2), (1, 3)]);
        let mut order = finish_order(&g);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn post_order_handles_long_chain_without_recursion() {
        let n = 200_000usize;
        let mut g = DirectedGraph::new(n);
        for v in 0..n - 1 {
            g.add_edge(v, v + 1).expect("edge");
        }
        g.add_edge(n - 1, 0).expect("edge");

        let res = kosaraju_scc(&g);
        assert_eq!(res.component_count(), 1);
        assert_eq!(res.components[0].len(), n);
        assert_eq!(res.components[0][0], 0);
    }

    #[test]
    fn component_members_are_reversed_post_order() {
        // 0 -> 1 -> 2 -> 0: harvesting from 0 walks 0, 1, 2 and finishes 2, 1, 0.
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let res = kosaraju_scc(&g);
        assert_eq!(res.components, vec![vec![0, 1, 2]]);
    }
}
