// Engine module - Core analysis logic (normalization, graph, KPIs, assembly)
// Pure functions from one input table to one result; no I/O, no shared state

mod assembler;
mod error;
pub mod graph;
pub mod kpi;
pub mod normalize;
pub mod preview;
pub mod report;
pub mod timestamp;

pub use assembler::{AnalysisResult, Stats, assemble};
pub use error::{Error, Result};
pub use graph::{Edge, Node, ProcessGraph, build_graph};
pub use kpi::{KpiResult, TimingKpis, compute_kpis};
pub use normalize::normalize;
pub use preview::{AutomationRequest, DEFAULT_PREVIEW_LIMIT, GraphPreview, ReportRequest};
pub use report::{ReportGenerator, ReportedAnalysis, analyze_with_report, suggest_automations};

use proctwin_types::Table;
use tracing::info;

// Façade API - Stable public interface for the CLI layer

/// Run the full pipeline: normalize, build the graph, compute KPIs, assemble
pub fn analyze(table: &Table) -> Result<AnalysisResult> {
    let log = normalize(table)?;
    let graph = build_graph(&log);
    let kpi = compute_kpis(&log);
    let result = assemble(&log, graph, kpi);

    info!(
        cases = result.stats.num_cases,
        events = result.stats.num_events,
        steps = result.stats.num_steps,
        transitions = result.stats.num_transitions,
        has_timestamp = result.kpi.has_timestamp,
        "process analyzed"
    );

    Ok(result)
}
