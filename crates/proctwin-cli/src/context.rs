use crate::args::ColumnArgs;
use crate::config::Config;
use crate::loader::load_table;
use crate::report_command::CommandReportGenerator;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use proctwin_types::Table;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    config_path: PathBuf,
    config: Config,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(config_path: PathBuf, format: OutputFormat) -> Result<Self> {
        let config = Config::load_from(&config_path)?;
        Ok(Self {
            config_path,
            config,
            format,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a CSV file and rename its columns to the canonical roles
    pub fn load_mapped(&self, file: &Path, columns: &ColumnArgs) -> Result<Table> {
        let table = load_table(file)?;
        let mapping = self.config.mapping(columns);
        table.with_mapping(&mapping).with_context(|| {
            format!(
                "Column mapping failed for {} (use --case-col/--step-col or `proctwin detect-columns`)",
                file.display()
            )
        })
    }

    pub fn report_generator(&self) -> Result<CommandReportGenerator> {
        CommandReportGenerator::from_config(&self.config.report)
            .with_context(|| format!("Config file: {}", self.config_path.display()))
    }
}
