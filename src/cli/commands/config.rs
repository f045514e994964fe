//! Config command implementation
//!
//! This module implements the `config` command, which prints the resolved
//! configuration snapshot with secrets redacted.

use crate::config::{env_var_for_key, Application, KNOWN_KEYS};
use crate::logging::LogHandle;
use clap::Args;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the snapshot as JSON instead of TOML
    #[arg(long)]
    pub json: bool,

    /// List the environment variable bound to every key
    #[arg(long)]
    pub env: bool,
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self, app: &Application, log: &LogHandle) -> anyhow::Result<i32> {
        log.in_scope(|| {
            tracing::info!(config_path = %app.config_path.display(), "Showing application config")
        });

        if self.env {
            print!("{}", Self::render_bindings());
        } else if self.json {
            println!("{}", serde_json::to_string_pretty(app)?);
        } else {
            print!("{app}");
        }
        Ok(0)
    }

    fn render_bindings() -> String {
        let width = KNOWN_KEYS.iter().map(|k| k.len()).max().unwrap_or(0);
        KNOWN_KEYS
            .iter()
            .map(|key| format!("{key:<width$}  {}\n", env_var_for_key(key)))
            .collect()
    }
}
