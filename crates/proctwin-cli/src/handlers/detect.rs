use crate::context::ExecutionContext;
use crate::detect::detect_columns;
use crate::loader::load_table;
use crate::types::OutputFormat;
use crate::views::print_detection;
use anyhow::Result;
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, file: &Path) -> Result<()> {
    let table = load_table(file)?;
    let columns = table.columns();
    let guess = detect_columns(columns);

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "columns": columns,
                "guess": guess,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Plain => print_detection(&file.display().to_string(), columns, &guess),
    }
    Ok(())
}
