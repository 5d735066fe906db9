//! lms-sync CLI
//!
//! Selects and synchronizes course archives into a local directory tree.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use lms_core::{Config, ConfigDefaults};

use cli::{Cli, Commands};
use commands::ExtractArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let defaults = ConfigDefaults::from_home_dir()?;
    let config = Config::load(cli.command.config_path(), &defaults)?;
    logging::init(config.settings.log_level, cli.verbose)?;
    tracing::debug!(
        courses = config.courses.len(),
        "Configuration loaded"
    );

    execute_command(cli.command, &config)
}

fn execute_command(cmd: Commands, config: &Config) -> Result<()> {
    match cmd {
        Commands::Check { config: path } => commands::run_check(&path, config),
        Commands::Sync { mirror, .. } => commands::run_sync(config, &mirror),
        Commands::Extract {
            course,
            catalog,
            archive,
            title,
            ..
        } => commands::run_extract(
            config,
            &ExtractArgs {
                course,
                catalog,
                archive,
                title,
            },
        ),
        Commands::CleanSummaries { .. } => commands::run_clean_summaries(config),
    }
}
