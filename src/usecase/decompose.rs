use crate::domain::graph::{DirectedGraph, SccResult};
use crate::domain::traits::SccDecomposer;
use crate::infrastructure::edge_list_reader::EdgeListDto;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::SccStats;
use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct DecomposeOptions {
    /// Refuse graphs with more nodes than this, before allocating them.
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DecomposeOutcome {
    pub graph: DirectedGraph,
    pub scc: SccResult,
    pub stats: SccStats,
}

pub async fn decompose_edge_list(
    input: EdgeListDto,
    decomposer: &dyn SccDecomposer,
    options: &DecomposeOptions,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<DecomposeOutcome> {
    if let Some(max) = options.max_nodes {
        if input.node_count > 0 && input.node_count as u64 > max as u64 {
            bail!(
                "graph has {} nodes, more than --max-nodes {max}",
                input.node_count
            );
        }
    }

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "build_graph".into(),
        },
    )
    .await;
    let graph = input.into_graph().context("building graph from edge list")?;
    emit(
        &sink,
        AppEvent::GraphBuilt {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "build_graph".into(),
        },
    )
    .await;

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc = decomposer.decompose(&graph);
    emit(
        &sink,
        AppEvent::SccComputed {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: scc.component_count(),
            cyclic_components: scc.cyclic_count(),
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "summarize".into(),
        },
    )
    .await;
    let stats = SccStats::summarize(&graph, &scc);
    info!(
        nodes = stats.nodes,
        edges = stats.edges,
        components = stats.components,
        "decomposition finished"
    );
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "summarize".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;

    Ok(DecomposeOutcome { graph, scc, stats })
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
