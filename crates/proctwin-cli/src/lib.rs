// proctwin CLI
//
// Thin shell around proctwin-engine: loads CSV exports, applies column
// mapping from flags or config, and renders results as plain text or JSON.
// Report text comes from an external command configured under [report];
// the CLI never talks to a model itself.

mod args;
mod commands;
pub mod config;
mod context;
pub mod detect;
mod handlers;
pub mod loader;
mod logging;
pub mod report_command;
pub mod types;
mod views;

pub use args::{Cli, ColumnArgs, Commands};
pub use commands::run;
