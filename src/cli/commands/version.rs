//! Version command implementation

use crate::config::{Application, APPLICATION_NAME};
use crate::logging::LogHandle;
use clap::Args;

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {}

impl VersionArgs {
    /// Execute the version command
    pub fn execute(&self, _app: &Application, log: &LogHandle) -> anyhow::Result<i32> {
        log.in_scope(|| tracing::debug!("Printing version"));

        println!("Application:         {APPLICATION_NAME}");
        println!("Version:             {}", env!("CARGO_PKG_VERSION"));
        Ok(0)
    }
}
