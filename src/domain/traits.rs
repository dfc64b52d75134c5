use crate::domain::graph::{DirectedGraph, SccResult};

/// Port for strongly connected component decomposition.
///
/// Implementations must be deterministic for a fixed adjacency order.
pub trait SccDecomposer {
    fn decompose(&self, graph: &DirectedGraph) -> SccResult;
}
