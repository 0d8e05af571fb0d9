use anyhow::{Context, Result, bail};
use proctwin_types::Table;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a CSV export into a table. Only `.csv` files are accepted.
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => {}
        Some("xls") | Some("xlsx") => {
            bail!(
                "Excel files are not supported: export {} as .csv first",
                path.display()
            )
        }
        _ => bail!(
            "Unsupported file format: {} (expected a .csv file)",
            path.display()
        ),
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let table =
        read_table(file).with_context(|| format!("Failed to read {}", path.display()))?;

    debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

pub fn read_table<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("No columns detected");
    }

    let mut table = Table::new(headers);
    for (idx, record) in reader.records().enumerate() {
        // +2: one-based, after the header line
        let record = record.with_context(|| format!("Invalid CSV record on line {}", idx + 2))?;
        table.push_row(record.iter())?;
    }
    Ok(table)
}
