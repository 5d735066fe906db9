//! CLI argument parsing using clap derive

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// lms-sync - Mirror course archives into a local directory tree
#[derive(Parser, Debug)]
#[command(name = "lms-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate a configuration file and list its course configs
    Check {
        /// Configuration file (.yaml, .yml, .json or .toml)
        #[arg(short, long, env = "LMS_SYNC_CONFIG")]
        config: PathBuf,
    },

    /// Synchronize every configured course from a mirrored site
    ///
    /// The mirror directory holds courses.json plus, per course id,
    /// catalog.json and archive.zip.
    Sync {
        /// Configuration file
        #[arg(short, long, env = "LMS_SYNC_CONFIG")]
        config: PathBuf,

        /// Mirror directory standing in for the remote site
        #[arg(short, long)]
        mirror: PathBuf,
    },

    /// Synchronize one local archive using one course config
    ///
    /// Examples:
    ///   lms-sync extract -c config.yaml --course 0 --catalog catalog.json --archive course.zip
    Extract {
        /// Configuration file
        #[arg(short, long, env = "LMS_SYNC_CONFIG")]
        config: PathBuf,

        /// Zero-based index of the course config to use
        #[arg(long)]
        course: usize,

        /// JSON catalog of the course's categories and entries
        #[arg(long)]
        catalog: PathBuf,

        /// Course archive (zip)
        #[arg(long)]
        archive: PathBuf,

        /// Remote course title, used for the default destination
        #[arg(long)]
        title: Option<String>,
    },

    /// Delete expired summary reports
    CleanSummaries {
        /// Configuration file
        #[arg(short, long, env = "LMS_SYNC_CONFIG")]
        config: PathBuf,
    },
}

impl Commands {
    /// The configuration file every command reads.
    pub fn config_path(&self) -> &Path {
        match self {
            Commands::Check { config }
            | Commands::Sync { config, .. }
            | Commands::Extract { config, .. }
            | Commands::CleanSummaries { config } => config,
        }
    }
}
