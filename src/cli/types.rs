//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::builds::BuildsArgs;
use crate::cli::commands::overview::OverviewArgs;
use crate::infrastructure::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "knope")]
#[command(about = "Get information out of AWS CodeBuild", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default is $HOME/.knope/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AWS region to query
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// AWS shared-config profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all the projects
    Projects,

    /// List all the builds for a given project
    Builds(BuildsArgs),

    /// Show the last build of every project
    Overview(OverviewArgs),
}

impl Cli {
    /// Command-line values that take precedence over every config source.
    pub fn overrides(&self) -> ConfigOverrides {
        let (max_concurrency, lookup_timeout_secs) = match &self.command {
            Commands::Overview(args) => (args.concurrency, args.timeout),
            _ => (None, None),
        };

        ConfigOverrides {
            region: self.region.clone(),
            profile: self.profile.clone(),
            max_concurrency,
            lookup_timeout_secs,
            verbose: self.verbose,
        }
    }
}
