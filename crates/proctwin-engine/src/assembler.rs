use crate::graph::ProcessGraph;
use crate::kpi::KpiResult;
use proctwin_types::EventLog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub num_cases: usize,
    pub num_events: usize,
    /// Distinct step labels
    pub num_steps: usize,
    /// Distinct edges, not edge occurrences
    pub num_transitions: usize,
}

/// Output bundle of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub stats: Stats,
    pub graph: ProcessGraph,
    pub kpi: KpiResult,
}

pub fn assemble(log: &EventLog, graph: ProcessGraph, kpi: KpiResult) -> AnalysisResult {
    let stats = Stats {
        num_cases: log.num_cases(),
        num_events: log.len(),
        num_steps: graph.nodes.len(),
        num_transitions: graph.edges.len(),
    };

    AnalysisResult { stats, graph, kpi }
}
