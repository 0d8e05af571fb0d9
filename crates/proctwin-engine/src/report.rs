use crate::assembler::AnalysisResult;
use crate::preview::{AutomationRequest, ReportRequest};
use crate::{Error, Result};
use proctwin_types::Table;
use serde::Serialize;
use tracing::debug;

/// Turns analysis payloads into prose.
///
/// Implementations own their transport (remote model, local command, ...);
/// the engine only hands over the serialized summary.
pub trait ReportGenerator {
    fn report(&self, request: &ReportRequest) -> Result<String>;

    fn automations(&self, request: &AutomationRequest) -> Result<String>;
}

/// Analysis result with the generated report attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedAnalysis {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub report: String,
}

pub fn analyze_with_report(
    table: &Table,
    generator: &dyn ReportGenerator,
    preview_limit: usize,
) -> Result<ReportedAnalysis> {
    let analysis = crate::analyze(table)?;
    let request = ReportRequest::new(&analysis, preview_limit);
    let report = generator.report(&request).map_err(into_report_error)?;
    debug!(chars = report.len(), "report generated");
    Ok(ReportedAnalysis { analysis, report })
}

pub fn suggest_automations(
    analysis: &AnalysisResult,
    domain: &str,
    generator: &dyn ReportGenerator,
    preview_limit: usize,
) -> Result<String> {
    let request = AutomationRequest::new(analysis, domain, preview_limit);
    generator.automations(&request).map_err(into_report_error)
}

fn into_report_error(err: Error) -> Error {
    match err {
        Error::Report(_) => err,
        other => Error::Report(other.to_string()),
    }
}
