//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use common_build::output::OutputConfig;

use crate::commands;

/// Common Build - Propagate a shared build policy across a workspace
#[derive(Parser, Debug)]
#[command(name = "common-build")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full configuration pass and print the workspace summary
    Configure(commands::configure::ConfigureArgs),
    /// Parse the manifest and resolve the catalog without applying anything
    Validate(commands::validate::ValidateArgs),
    /// Print the resolved version catalog
    Catalog(commands::catalog::CatalogArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();
        let out = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Configure(args) => commands::configure::execute(args, &out),
            Commands::Validate(args) => commands::validate::execute(args, &out),
            Commands::Catalog(args) => commands::catalog::execute(args, &out),
        }
    }
}
