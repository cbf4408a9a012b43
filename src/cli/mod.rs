//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::adapters::CodeBuildService;
use crate::domain::ports::BuildService;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;

pub use commands::CommandContext;
pub use types::{Cli, Commands};

/// Resolve configuration, install logging and dispatch the chosen command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref(), &cli.overrides())?;
    let _logger = LoggerImpl::init(&config.logging)?;
    debug!(?config, "configuration loaded");

    let service: Arc<dyn BuildService> =
        Arc::new(CodeBuildService::from_config(&config.aws).await);
    let ctx = CommandContext {
        service,
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Projects => commands::projects::execute(&ctx).await,
        Commands::Builds(args) => commands::builds::execute(args, &ctx).await,
        Commands::Overview(args) => commands::overview::execute(args, &ctx).await,
    }
}

/// Report a fatal error and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
