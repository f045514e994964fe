// dbapi - database API tool
// Copyright (c) 2025 dbapi Contributors
// Licensed under the MIT License

use anyhow::Context;
use clap::Parser;
use dbapi::cli::{Cli, Commands};
use dbapi::config::{snapshot, Application, Resolver};
use dbapi::logging::{log_app_config, LogHandle};
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };

    process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let app = Resolver::new()
        .resolve(cli.cli_options())
        .context("failed to load application config")?;
    let app = snapshot::install(app)?;

    let log = LogHandle::from_config(app)?;
    log.in_scope(|| {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            config_path = %app.config_path.display(),
            "dbapi starting"
        );
        log_app_config(app);
    });

    execute_command(cli, app, &log)
}

/// Execute the CLI command
fn execute_command(cli: &Cli, app: &Application, log: &LogHandle) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Version(args) => args.execute(app, log),
        Commands::Config(args) => args.execute(app, log),
    }
}
