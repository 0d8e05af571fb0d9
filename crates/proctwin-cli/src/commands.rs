use super::args::{Cli, Commands};
use super::handlers;
use crate::config::resolve_config_path;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let ctx = ExecutionContext::new(config_path, cli.format)?;

    match cli.command {
        Commands::Analyze {
            file,
            columns,
            with_report,
        } => handlers::analyze::handle(&ctx, &file, &columns, with_report),

        Commands::DetectColumns { file } => handlers::detect::handle(&ctx, &file),

        Commands::Preview {
            file,
            columns,
            limit,
        } => handlers::preview::handle(&ctx, &file, &columns, limit),

        Commands::SuggestAutomations {
            file,
            columns,
            domain,
        } => handlers::automations::handle(&ctx, &file, &columns, domain),
    }
}
