use crate::domain::error::{GraphError, GraphResult};

/// Directed graph over dense node indices `0..node_count`.
///
/// Adjacency order is the edge insertion order. Traversals visit neighbours in
/// that order, so it decides finish order and component ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectedGraph {
    edges: Vec<Vec<usize>>,
}

impl DirectedGraph {
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    /// Checked constructor for counts coming from untrusted input.
    pub fn create(node_count: i64) -> GraphResult<Self> {
        let n = usize::try_from(node_count).map_err(|_| GraphError::invalid_size(node_count))?;
        Ok(Self::new(n))
    }

    /// Builds a graph from raw `(from, to)` pairs, stopping at the first bad edge.
    pub fn from_edge_list<I>(node_count: i64, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut g = Self::create(node_count)?;
        for (from, to) in edges {
            let from = g.checked_index(from)?;
            let to = g.checked_index(to)?;
            g.edges[from].push(to);
        }
        Ok(g)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Appends `to` to the adjacency of `from`. Duplicates and self-loops are kept.
    pub fn add_edge(&mut self, from: usize, to: usize) -> GraphResult<()> {
        let n = self.node_count();
        for node in [from, to] {
            if node >= n {
                return Err(GraphError::out_of_range(
                    i64::try_from(node).unwrap_or(i64::MAX),
                    n,
                ));
            }
        }
        self.edges[from].push(to);
        Ok(())
    }

    /// Out-neighbours of `node` in insertion order.
    ///
    /// Panics if `node >= node_count()`.
    pub fn neighbours(&self, node: usize) -> &[usize] {
        &self.edges[node]
    }

    pub fn has_self_loop(&self, node: usize) -> bool {
        self.edges[node].contains(&node)
    }

    /// Returns the graph with every edge reversed.
    ///
    /// Source nodes are scanned in increasing index order and each adjacency
    /// list front to back, so the result's adjacency order is deterministic.
    pub fn transpose(&self) -> Self {
        let mut rev = Self::new(self.node_count());
        for (u, outs) in self.edges.iter().enumerate() {
            for &v in outs {
                rev.edges[v].push(u);
            }
        }
        rev
    }

    fn checked_index(&self, node: i64) -> GraphResult<usize> {
        let n = self.node_count();
        usize::try_from(node)
            .ok()
            .filter(|&i| i < n)
            .ok_or_else(|| GraphError::out_of_range(node, n))
    }
}

/// Outcome of one decomposition run.
///
/// `components` is in the order the components were discovered; nodes inside a
/// component are in reversed post-order of the harvesting traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SccResult {
    pub component_of: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    /// Derives the lookup tables for a finished partition of `graph`.
    pub fn from_components(graph: &DirectedGraph, components: Vec<Vec<usize>>) -> Self {
        let mut component_of = vec![usize::MAX; graph.node_count()];
        let mut cyclic_component = Vec::with_capacity(components.len());

        for (cid, comp) in components.iter().enumerate() {
            for &v in comp {
                component_of[v] = cid;
            }
            let cyclic = match comp.as_slice() {
                [only] => graph.has_self_loop(*only),
                _ => true,
            };
            cyclic_component.push(cyclic);
        }

        Self {
            component_of,
            components,
            cyclic_component,
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Index into `components` of the component holding `node`.
    pub fn component_of(&self, node: usize) -> Option<usize> {
        self.component_of
            .get(node)
            .copied()
            .filter(|&c| c != usize::MAX)
    }

    pub fn same_component(&self, u: usize, v: usize) -> bool {
        match (self.component_of(u), self.component_of(v)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }

    pub fn singleton_count(&self) -> usize {
        self.components.iter().filter(|c| c.len() == 1).count()
    }

    pub fn largest_component_len(&self) -> usize {
        self.components.iter().map(|c| c.len()).max().unwrap_or(0)
    }
}
