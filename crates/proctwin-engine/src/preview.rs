use crate::assembler::{AnalysisResult, Stats};
use crate::graph::{Edge, Node, ProcessGraph};
use crate::kpi::KpiResult;
use serde::Serialize;

/// Number of nodes/edges handed to text generators
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Positional prefix of a graph: relies on nodes already being sorted by count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphPreview {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub top_nodes: Vec<Node>,
    pub top_edges: Vec<Edge>,
}

impl GraphPreview {
    pub fn from_graph(graph: &ProcessGraph, limit: usize) -> Self {
        Self {
            num_nodes: graph.nodes.len(),
            num_edges: graph.edges.len(),
            top_nodes: graph.nodes.iter().take(limit).cloned().collect(),
            top_edges: graph.edges.iter().take(limit).cloned().collect(),
        }
    }
}

/// Payload for a process report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub stats: Stats,
    pub graph_summary: GraphPreview,
}

impl ReportRequest {
    pub fn new(result: &AnalysisResult, limit: usize) -> Self {
        Self {
            stats: result.stats,
            graph_summary: GraphPreview::from_graph(&result.graph, limit),
        }
    }
}

/// Payload for automation suggestions in a business domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationRequest {
    pub domain: String,
    pub stats: Stats,
    pub graph_summary: GraphPreview,
    pub kpi: KpiResult,
}

impl AutomationRequest {
    pub fn new(result: &AnalysisResult, domain: impl Into<String>, limit: usize) -> Self {
        Self {
            domain: domain.into(),
            stats: result.stats,
            graph_summary: GraphPreview::from_graph(&result.graph, limit),
            kpi: result.kpi.clone(),
        }
    }
}
