use crate::args::ColumnArgs;
use crate::context::ExecutionContext;
use anyhow::Result;
use proctwin_engine::{ReportRequest, analyze};
use std::path::Path;

/// Always prints JSON: the payload is meant to be piped into other tools
pub fn handle(
    ctx: &ExecutionContext,
    file: &Path,
    columns: &ColumnArgs,
    limit: Option<usize>,
) -> Result<()> {
    let table = ctx.load_mapped(file, columns)?;
    let result = analyze(&table)?;
    let limit = limit.unwrap_or(ctx.config().report.preview_limit);

    let request = ReportRequest::new(&result, limit);
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
