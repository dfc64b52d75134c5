use crate::domain::graph::{DirectedGraph, SccResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccStats {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub cyclic_components: usize,
    pub singleton_components: usize,
    pub largest_component: usize,
}

impl SccStats {
    pub fn summarize(graph: &DirectedGraph, scc: &SccResult) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: scc.component_count(),
            cyclic_components: scc.cyclic_count(),
            singleton_components: scc.singleton_count(),
            largest_component: scc.largest_component_len(),
        }
    }
}
