//! Configuration management for dbapi.
//!
//! The application configuration is resolved once at startup from layered
//! sources and then frozen into a read-only snapshot.
//!
//! # Layers
//!
//! Highest precedence first:
//!
//! 1. Command-line overrides (`--quiet`)
//! 2. Environment variables (`DBAPI_<SECTION>_<KEY>`)
//! 3. The config file (explicit `--config`, or the first one discovered)
//! 4. Compiled-in defaults contributed by each section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dbapi::config::{snapshot, CliOnlyOptions, Resolver};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Resolver::new().resolve(CliOnlyOptions::default())?;
//! let app = snapshot::install(app)?;
//!
//! println!("Database host: {}", app.database.host);
//! println!("Log level: {}", app.log.effective_level);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```yaml
//! quiet: false
//! log:
//!   level: "warn"
//!   structured: true
//!   file: "/var/log/dbapi.log"
//! database:
//!   dbname: "users"
//!   host: "db.internal"
//!   port: 5432
//!   user: "reader"
//!   password: "secret"
//!   ssl: "require"
//! ```
//!
//! # Environment Variables
//!
//! Every key can be set from the environment:
//!
//! ```bash
//! export DBAPI_DATABASE_PORT=5432
//! export DBAPI_LOG_LEVEL=debug
//! ```

pub mod discovery;
pub mod loader;
pub mod schema;
pub mod secret;
pub mod sections;
pub mod snapshot;

// Re-export commonly used types
pub use discovery::{ConfigFile, Discovery, SearchLocation};
pub use loader::Resolver;
pub use schema::{
    Application, CliOnlyOptions, DatabaseSection, LogLevel, LoggingSection,
    DEFAULT_DATABASE_HOST, DEFAULT_DATABASE_PORT, DEV_CONFIG_PATH,
};
pub use secret::{secret_string, SecretString, SecretValue};
pub use sections::{
    env_var_for_key, section_keys, SectionHandler, APPLICATION_NAME, KNOWN_KEYS, SECTIONS,
};
