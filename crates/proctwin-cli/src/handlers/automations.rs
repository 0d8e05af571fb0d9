use crate::args::ColumnArgs;
use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use anyhow::Result;
use proctwin_engine::{analyze, suggest_automations};
use std::path::Path;

pub fn handle(
    ctx: &ExecutionContext,
    file: &Path,
    columns: &ColumnArgs,
    domain: Option<String>,
) -> Result<()> {
    let generator = ctx.report_generator()?;
    let table = ctx.load_mapped(file, columns)?;
    let result = analyze(&table)?;

    let report_config = &ctx.config().report;
    let domain = domain.unwrap_or_else(|| report_config.domain.clone());
    let ideas = suggest_automations(&result, &domain, &generator, report_config.preview_limit)?;

    match ctx.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "ideas": ideas }))?
            );
        }
        OutputFormat::Plain => println!("{}", ideas),
    }
    Ok(())
}
