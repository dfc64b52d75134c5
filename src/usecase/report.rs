use crate::domain::graph::SccResult;
use crate::usecase::stats::SccStats;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

/// Graphs below this many nodes get a membership listing under [`DetailPolicy::Auto`].
pub const AUTO_DETAIL_MAX_NODES: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailPolicy {
    #[default]
    Auto,
    Always,
    Never,
}

impl DetailPolicy {
    pub fn includes_members(self, node_count: usize) -> bool {
        match self {
            DetailPolicy::Auto => node_count < AUTO_DETAIL_MAX_NODES,
            DetailPolicy::Always => true,
            DetailPolicy::Never => false,
        }
    }
}

impl FromStr for DetailPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(DetailPolicy::Auto),
            "always" => Ok(DetailPolicy::Always),
            "never" => Ok(DetailPolicy::Never),
            other => Err(anyhow!("unknown detail policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReport {
    /// 1-based position in discovery order.
    pub index: usize,
    pub cyclic: bool,
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccReport {
    pub stats: SccStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentReport>>,
}

impl SccReport {
    pub fn build(scc: &SccResult, stats: SccStats, detail: DetailPolicy) -> Self {
        let components = detail.includes_members(stats.nodes).then(|| {
            scc.components
                .iter()
                .zip(scc.cyclic_component.iter())
                .enumerate()
                .map(|(i, (nodes, &cyclic))| ComponentReport {
                    index: i + 1,
                    cyclic,
                    nodes: nodes.clone(),
                })
                .collect()
        });

        Self { stats, components }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "This graph has {} strongly connected components",
            self.stats.components
        );
        for comp in self.components.iter().flatten() {
            let _ = write!(out, "Component {}:", comp.index);
            for v in &comp.nodes {
                let _ = write!(out, " {v}");
            }
            out.push('\n');
        }
        out
    }
}
