//! Layered configuration resolution
//!
//! This module turns the command-line-only options into a finished
//! [`Application`] snapshot. It:
//! 1. Collects compiled-in defaults from every section
//! 2. Discovers and parses the config file
//! 3. Layers defaults < file < environment (`DBAPI_*`) < CLI overrides
//! 4. Materializes the merged store into [`Application`]
//! 5. Runs every section's validation and derivation
//!
//! Construction is all-or-nothing: any error aborts before a snapshot exists.

use super::discovery::Discovery;
use super::schema::{Application, CliOnlyOptions};
use super::sections::{env_var_for_key, Defaults, APPLICATION_NAME, KNOWN_KEYS, SECTIONS};
use crate::domain::errors::ConfigError;
use config::{Config, Environment};
use std::collections::HashMap;
use tracing::debug;

/// Resolves the application configuration snapshot from its layers
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    discovery: Discovery,
    environment: Option<HashMap<String, String>>,
}

impl Resolver {
    /// Resolver using the standard search locations and the process environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the search locations used when no explicit path is given
    pub fn with_discovery(mut self, discovery: Discovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Reads environment bindings from `vars` instead of the process environment
    pub fn with_environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Builds the snapshot
    ///
    /// # Errors
    ///
    /// Returns whichever [`ConfigError`] the first failing layer or section
    /// produced. No fallback or retry is attempted.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dbapi::config::{CliOnlyOptions, Resolver};
    ///
    /// let cli = CliOnlyOptions {
    ///     config_path: Some("dbapi.yaml".into()),
    ///     verbosity: 2,
    ///     ..Default::default()
    /// };
    /// let app = Resolver::new().resolve(cli).expect("Failed to resolve config");
    /// println!("{}", app.log.effective_level);
    /// ```
    pub fn resolve(&self, cli: CliOnlyOptions) -> Result<Application, ConfigError> {
        let mut defaults = Defaults::default();
        defaults.set("quiet", false);
        for section in SECTIONS {
            section.contribute_defaults(&mut defaults);
        }

        let file = self.discovery.discover(cli.effective_config_path())?;

        let mut builder = defaults
            .apply(Config::builder())?
            .add_source(file.contents)
            .add_source(self.environment_source());
        if cli.quiet {
            builder = builder
                .set_override("quiet", true)
                .map_err(|e| ConfigError::Merge(format!("quiet override: {e}")))?;
        }

        let merged = builder
            .build()
            .map_err(|e| ConfigError::Merge(e.to_string()))?;

        let mut app: Application = merged
            .try_deserialize()
            .map_err(|e| ConfigError::Unmarshal(e.to_string()))?;
        app.config_path = file.path;
        app.cli_options = cli;

        for section in SECTIONS {
            section.validate_and_derive(&mut app)?;
        }

        debug!(
            config_path = %app.config_path.display(),
            level = %app.log.effective_level,
            "Resolved application config"
        );
        Ok(app)
    }

    fn environment_source(&self) -> Environment {
        Environment::with_prefix(&APPLICATION_NAME.to_ascii_uppercase())
            .separator("_")
            .ignore_empty(true)
            .source(Some(self.environment_bindings()))
    }

    /// Looks up the variable bound to every known key
    ///
    /// Only exact `DBAPI_<SECTION>_<KEY>` names are consulted and empty values
    /// count as unset, so stray variables never reach the merge store.
    fn environment_bindings(&self) -> HashMap<String, String> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| {
                let name = env_var_for_key(key);
                let value = match &self.environment {
                    Some(vars) => vars.get(&name).cloned(),
                    None => std::env::var(&name).ok(),
                }?;
                (!value.is_empty()).then_some((name, value))
            })
            .collect()
    }
}
