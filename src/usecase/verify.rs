use crate::domain::graph::{DirectedGraph, SccResult};
use anyhow::{anyhow, ensure, Result};
use std::collections::VecDeque;

/// Independently checks that `scc` is the strongly connected partition of `graph`.
///
/// Partition, lookup-table consistency, strong connectivity of each component,
/// and maximality (acyclic condensation) are all checked. Runs in O(N + E).
pub fn verify_decomposition(graph: &DirectedGraph, scc: &SccResult) -> Result<()> {
    let n = graph.node_count();

    // Partition + component_of agreement.
    let mut owner = vec![usize::MAX; n];
    for (cid, comp) in scc.components.iter().enumerate() {
        ensure!(!comp.is_empty(), "component {cid} is empty");
        for &v in comp {
            ensure!(v < n, "component {cid} holds unknown node {v}");
            ensure!(
                owner[v] == usize::MAX,
                "node {v} appears in components {} and {cid}",
                owner[v]
            );
            owner[v] = cid;
        }
    }
    if let Some(v) = owner.iter().position(|&c| c == usize::MAX) {
        return Err(anyhow!("node {v} is not in any component"));
    }
    ensure!(
        scc.component_of == owner,
        "component_of does not match component membership"
    );
    ensure!(
        scc.cyclic_component.len() == scc.components.len(),
        "cyclic flags do not match component count"
    );

    // Each component is strongly connected using only its own nodes.
    let transposed = graph.transpose();
    for (cid, comp) in scc.components.iter().enumerate() {
        let root = comp[0];
        for (g, dir) in [(graph, "forward"), (&transposed, "backward")] {
            let reached = reach_within(g, root, cid, &owner);
            ensure!(
                reached == comp.len(),
                "component {cid} is not strongly connected ({dir} reach {reached} of {})",
                comp.len()
            );
        }
    }

    // Maximality: no cycle between distinct components.
    let k = scc.components.len();
    let mut indegree = vec![0usize; k];
    let mut cond: Vec<Vec<usize>> = vec![Vec::new(); k];
    for u in 0..n {
        for &v in graph.neighbours(u) {
            let (a, b) = (owner[u], owner[v]);
            if a != b {
                cond[a].push(b);
                indegree[b] += 1;
            }
        }
    }
    let mut queue: VecDeque<usize> = (0..k).filter(|&c| indegree[c] == 0).collect();
    let mut removed = 0;
    while let Some(c) = queue.pop_front() {
        removed += 1;
        for &d in &cond[c] {
            indegree[d] -= 1;
            if indegree[d] == 0 {
                queue.push_back(d);
            }
        }
    }
    ensure!(
        removed == k,
        "components are not maximal: condensation graph has a cycle"
    );

    Ok(())
}

fn reach_within(graph: &DirectedGraph, root: usize, cid: usize, owner: &[usize]) -> usize {
    let mut seen = vec![false; graph.node_count()];
    let mut stack = vec![root];
    seen[root] = true;
    let mut count = 0;

    while let Some(v) = stack.pop() {
        count += 1;
        for &w in graph.neighbours(v) {
            if owner[w] == cid && !seen[w] {
                seen[w] = true;
                stack.push(w);
            }
        }
    }
    count
}
