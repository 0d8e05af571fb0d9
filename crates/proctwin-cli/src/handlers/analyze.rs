use crate::args::ColumnArgs;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::views::{print_analysis, print_report};
use anyhow::Result;
use proctwin_engine::{analyze, analyze_with_report};
use std::path::Path;

pub fn handle(
    ctx: &ExecutionContext,
    file: &Path,
    columns: &ColumnArgs,
    with_report: bool,
) -> Result<()> {
    let table = ctx.load_mapped(file, columns)?;

    if with_report {
        let generator = ctx.report_generator()?;
        let reported =
            analyze_with_report(&table, &generator, ctx.config().report.preview_limit)?;
        match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reported)?),
            OutputFormat::Plain => {
                print_analysis(&reported.analysis);
                print_report(&reported.report);
            }
        }
        return Ok(());
    }

    let result = analyze(&table)?;
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Plain => print_analysis(&result),
    }
    Ok(())
}
