use crate::domain::graph::DirectedGraph;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

/// Raw edge-list contents, before any range checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListDto {
    pub node_count: i64,
    #[serde(default)]
    pub edges: Vec<(i64, i64)>,
}

impl EdgeListDto {
    pub fn into_graph(self) -> Result<DirectedGraph> {
        let graph = DirectedGraph::from_edge_list(self.node_count, self.edges)?;
        Ok(graph)
    }
}

pub async fn read_edge_list_file(path: &str) -> Result<EdgeListDto> {
    let raw = fs::read_to_string(path).await?;
    parse_edge_list(&raw)
}

/// Parses `<node_count>` followed by `from to` lines.
///
/// Blank lines and `#` comments are skipped. Tokens past the ones we need are
/// ignored on both header and edge lines.
pub fn parse_edge_list(raw: &str) -> Result<EdgeListDto> {
    let mut lines = raw
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| anyhow!("missing node count header"))?;
    let node_count = parse_token(header.split_whitespace().next(), "node count")
        .with_context(|| format!("line {header_no}"))?;

    let mut edges = Vec::new();
    for (line_no, line) in lines {
        let mut tokens = line.split_whitespace();
        let from = parse_token(tokens.next(), "edge source")
            .with_context(|| format!("line {line_no}"))?;
        let to = parse_token(tokens.next(), "edge target")
            .with_context(|| format!("line {line_no}"))?;
        edges.push((from, to));
    }

    debug!(node_count, edges = edges.len(), "edge list parsed");
    Ok(EdgeListDto { node_count, edges })
}

fn parse_token(token: Option<&str>, what: &str) -> Result<i64> {
    let token = token.ok_or_else(|| anyhow!("missing {what}"))?;
    token
        .parse::<i64>()
        .with_context(|| format!("invalid {what}: {token:?}"))
}
