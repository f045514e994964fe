//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dbapi using clap.
//! It only collects raw inputs; resolution happens in [`crate::config`].

pub mod commands;

use crate::config::CliOnlyOptions;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// dbapi - database API tool
#[derive(Parser, Debug)]
#[command(name = "dbapi")]
#[command(version, about, long_about = None)]
#[command(author = "dbapi Contributors")]
pub struct Cli {
    /// Config file (default is /etc/dbapi/dbapi.yaml or $HOME/.dbapi.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable development mode
    #[arg(short, long, global = true)]
    pub dev: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the version
    Version(commands::version::VersionArgs),

    /// Show the resolved application configuration
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// Options handed to the configuration resolver
    pub fn cli_options(&self) -> CliOnlyOptions {
        CliOnlyOptions {
            config_path: self.config.clone(),
            verbosity: self.verbose,
            dev_mode: self.dev,
            quiet: self.quiet,
        }
    }
}
