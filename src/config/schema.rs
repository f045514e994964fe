//! Configuration schema definitions
//!
//! The typed snapshot that the merged key-value store materializes into.
//! Field names match the keys accepted in config files and the environment
//! (`log.level`, `database.port`, `quiet`, ...).

use super::secret::{empty_secret, serialize_redacted, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Fixed path used in place of any explicit config path when dev mode is on
pub const DEV_CONFIG_PATH: &str = "../configs/test-config.yml";

/// Default database host when absent from every layer
pub const DEFAULT_DATABASE_HOST: &str = "127.0.0.1";

/// Default database port when absent from every layer
pub const DEFAULT_DATABASE_PORT: u16 = 3306;

/// Log severity threshold, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Suppresses everything the logger can emit
    Panic,
}

impl LogLevel {
    /// Canonical textual form, accepted back by [`LogLevel::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Panic => "panic",
        }
    }

    /// Level implied by repeating the verbosity flag `count` times
    ///
    /// Returns `None` for zero, which leaves the level to other sources.
    pub fn from_verbosity(count: u8) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }

    /// Threshold for the tracing subscriber
    ///
    /// `Panic` turns logging off; tracing has nothing above `ERROR`.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Panic => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "fatal" => Ok(LogLevel::Error),
            "panic" | "off" => Ok(LogLevel::Panic),
            _ => Err(format!(
                "invalid log level: {s:?}. Must be one of: trace, debug, info, warn, error, panic"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Show all log entries as JSON formatted strings
    pub structured: bool,

    /// The derived threshold the logger runs at
    #[serde(rename = "effective-level", skip_deserializing)]
    pub effective_level: LogLevel,

    /// The log level string hint, as read from a source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// The file path to write logs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Force console output even when a log file is configured
    pub console: bool,
}

impl LoggingSection {
    /// Whether log output should reach the console
    ///
    /// Console output is on when requested, when there is no log file, or when
    /// the user asked for verbosity. Quiet turns it off regardless.
    pub fn console_enabled(&self, verbosity: u8, quiet: bool) -> bool {
        (self.console || self.file.is_none() || verbosity > 0) && !quiet
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub dbname: String,

    /// The host to connect to
    pub host: String,

    /// The port to connect to
    pub port: u16,

    /// The user for the database connection
    pub user: String,

    /// The password for the database connection
    #[serde(serialize_with = "serialize_redacted")]
    pub password: SecretString,

    pub ssl: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            dbname: String::new(),
            host: DEFAULT_DATABASE_HOST.to_string(),
            port: DEFAULT_DATABASE_PORT,
            user: String::new(),
            password: empty_secret(),
            ssl: String::new(),
        }
    }
}

/// Options that only ever come from the command line
///
/// These are handed to the resolver by value and never enter the merge store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOnlyOptions {
    /// Explicit config file path (`-c/--config`)
    pub config_path: Option<PathBuf>,

    /// Number of times the verbosity flag was repeated
    pub verbosity: u8,

    /// Development mode (`-d/--dev`)
    pub dev_mode: bool,

    /// Quiet flag (`-q/--quiet`), applied as an override when set
    pub quiet: bool,
}

impl CliOnlyOptions {
    /// The path that must be read, bypassing the search order
    ///
    /// Dev mode always wins over a path given by flag.
    pub fn effective_config_path(&self) -> Option<&Path> {
        if self.dev_mode {
            Some(Path::new(DEV_CONFIG_PATH))
        } else {
            self.config_path.as_deref()
        }
    }
}

/// Root application configuration snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    /// Where the application config was read from
    #[serde(rename = "config-path", skip_deserializing)]
    pub config_path: PathBuf,

    /// Suppress all status output to stderr
    pub quiet: bool,

    pub log: LoggingSection,

    pub database: DatabaseSection,

    #[serde(skip)]
    pub cli_options: CliOnlyOptions,
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match toml::to_string_pretty(self) {
            Ok(rendered) => f.write_str(&rendered),
            Err(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Panic);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_parse_valid() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Panic);
    }

    #[test]
    fn test_log_level_parse_invalid() {
        assert!("bogus".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
        assert!("4".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_canonical_form_round_trips() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Panic,
        ] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_panic_level_turns_logging_off() {
        assert_eq!(LogLevel::Panic.to_level_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_console_enabled_rules() {
        let mut log = LoggingSection::default();
        assert!(log.console_enabled(0, false));
        assert!(!log.console_enabled(3, true));

        log.file = Some(PathBuf::from("/tmp/dbapi.log"));
        assert!(!log.console_enabled(0, false));
        assert!(log.console_enabled(1, false));

        log.console = true;
        assert!(log.console_enabled(0, false));
    }

    #[test]
    fn test_dev_mode_overrides_explicit_path() {
        let opts = CliOnlyOptions {
            config_path: Some(PathBuf::from("/srv/dbapi.yaml")),
            dev_mode: true,
            ..Default::default()
        };
        assert_eq!(
            opts.effective_config_path(),
            Some(Path::new(DEV_CONFIG_PATH))
        );

        let opts = CliOnlyOptions {
            dev_mode: false,
            ..opts
        };
        assert_eq!(
            opts.effective_config_path(),
            Some(Path::new("/srv/dbapi.yaml"))
        );
        assert_eq!(CliOnlyOptions::default().effective_config_path(), None);
    }

    #[test]
    fn test_display_redacts_password() {
        let mut app = Application::default();
        app.database.password = secret_string("hunter2".to_string());
        app.database.user = "admin".to_string();

        let rendered = app.to_string();
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("admin"));
        assert!(rendered.contains("[database]"));
    }
}
