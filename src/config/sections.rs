//! Per-section default injection and post-load processing
//!
//! Each configuration section that owns defaults or derived values registers a
//! [`SectionHandler`] in [`SECTIONS`]. The resolver walks that list twice:
//! once before materialization to collect defaults, and once afterwards to
//! validate and derive. The list order is the invocation order.

use super::schema::{
    Application, DatabaseSection, LogLevel, LoggingSection, DEFAULT_DATABASE_HOST,
    DEFAULT_DATABASE_PORT,
};
use crate::domain::errors::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Value};

/// Application name, used for the environment prefix and search paths
pub const APPLICATION_NAME: &str = "dbapi";

/// Every key path the snapshot reads from files and the environment
pub const KNOWN_KEYS: &[&str] = &[
    "quiet",
    "log.level",
    "log.structured",
    "log.file",
    "log.console",
    "database.dbname",
    "database.host",
    "database.port",
    "database.user",
    "database.password",
    "database.ssl",
];

/// Compiled-in defaults collected from every section
///
/// Entries keep their insertion order so the store sees them in the order the
/// sections were declared.
#[derive(Debug, Default)]
pub struct Defaults {
    entries: Vec<(String, Value)>,
}

impl Defaults {
    /// Registers a default for a dotted key path
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Key paths in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Writes every default into the builder at the lowest precedence
    pub fn apply(
        self,
        mut builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        for (key, value) in self.entries {
            builder = builder
                .set_default(key.as_str(), value)
                .map_err(|e| ConfigError::Merge(format!("default for {key}: {e}")))?;
        }
        Ok(builder)
    }
}

/// A configuration section that takes part in resolution
pub trait SectionHandler: Sync {
    /// Key of the section in the merged store
    fn key(&self) -> &'static str;

    /// Contributes this section's defaults before the store is materialized
    fn contribute_defaults(&self, _defaults: &mut Defaults) {}

    /// Validates and derives this section's fields after materialization
    fn validate_and_derive(&self, _app: &mut Application) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Handler for the `log` section
pub struct LoggingHandler;

/// Handler for the `database` section
pub struct DatabaseHandler;

/// Every section handler, in invocation order
pub static SECTIONS: &[&dyn SectionHandler] = &[&LoggingHandler, &DatabaseHandler];

/// Section keys in invocation order
pub fn section_keys() -> Vec<&'static str> {
    SECTIONS.iter().map(|s| s.key()).collect()
}

/// Name of the environment variable bound to a key path
///
/// `database.port` and `database-port` both map to `DBAPI_DATABASE_PORT`.
pub fn env_var_for_key(key: &str) -> String {
    let normalized: String = key
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("{}_{}", APPLICATION_NAME.to_ascii_uppercase(), normalized)
}

impl SectionHandler for LoggingHandler {
    fn key(&self) -> &'static str {
        "log"
    }

    fn contribute_defaults(&self, defaults: &mut Defaults) {
        defaults.set("log.level", LogLevel::default().as_str());
        defaults.set("log.structured", false);
        defaults.set("log.console", false);
    }

    fn validate_and_derive(&self, app: &mut Application) -> Result<(), ConfigError> {
        let quiet = app.quiet;
        let verbosity = app.cli_options.verbosity;
        app.log.derive_effective_level(quiet, verbosity)?;

        if app.log.file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            app.log.file = None;
        }
        Ok(())
    }
}

impl SectionHandler for DatabaseHandler {
    fn key(&self) -> &'static str {
        "database"
    }

    fn contribute_defaults(&self, defaults: &mut Defaults) {
        defaults.set("database.host", DEFAULT_DATABASE_HOST);
        defaults.set("database.port", i64::from(DEFAULT_DATABASE_PORT));
    }

    fn validate_and_derive(&self, app: &mut Application) -> Result<(), ConfigError> {
        app.database.validate()
    }
}

impl LoggingSection {
    /// Computes the effective level from quiet, verbosity and the level hint
    ///
    /// Quiet wins over everything. A non-zero verbosity picks the level and
    /// rewrites the hint to match. A hint that does not parse is an error.
    /// With none of these the effective level is left untouched.
    pub fn derive_effective_level(&mut self, quiet: bool, verbosity: u8) -> Result<(), ConfigError> {
        if quiet {
            self.effective_level = LogLevel::Panic;
            return Ok(());
        }

        if let Some(level) = LogLevel::from_verbosity(verbosity) {
            self.effective_level = level;
            self.level = Some(level.as_str().to_string());
        }

        if let Some(hint) = self.level.as_deref().filter(|h| !h.trim().is_empty()) {
            self.effective_level = hint
                .parse()
                .map_err(|reason: String| ConfigError::validation("log", reason))?;
        }

        Ok(())
    }
}

impl DatabaseSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation("database", "host must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::validation("database", "port must be > 0"));
        }
        Ok(())
    }
}
