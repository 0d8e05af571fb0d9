use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "proctwin")]
#[command(about = "Derive process graphs and time KPIs from event logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $PROCTWIN_PATH/config.toml or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a CSV event log: stats, transition graph and time KPIs
    Analyze {
        file: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Attach a generated report (requires [report].command in config)
        #[arg(long)]
        with_report: bool,
    },

    /// List the columns of a CSV file and guess their roles
    DetectColumns { file: PathBuf },

    /// Print the summary payload handed to report generators
    Preview {
        file: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Number of top nodes/edges to include (defaults to config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Ask the configured generator for automation ideas
    SuggestAutomations {
        file: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Business context passed to the generator (defaults to config)
        #[arg(long)]
        domain: Option<String>,
    },
}

/// Source column overrides; unset values fall back to the config
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    #[arg(long)]
    pub case_col: Option<String>,

    #[arg(long)]
    pub step_col: Option<String>,

    #[arg(long)]
    pub ts_col: Option<String>,
}
