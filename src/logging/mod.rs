//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr, silenced by quiet mode
//! - Appending to a log file when `log.file` is set
//! - JSON-formatted output when `log.structured` is set
//! - A threshold taken from the derived effective log level
//!
//! # Example
//!
//! ```no_run
//! use dbapi::config::Application;
//! use dbapi::logging::{log_app_config, LogHandle};
//!
//! let app = Application::default();
//! let log = LogHandle::from_config(&app).expect("Failed to initialize logging");
//! let _active = log.enter();
//!
//! log_app_config(&app);
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::LogHandle;

use crate::config::Application;

/// Logs the resolved configuration at debug level, secrets redacted
pub fn log_app_config(app: &Application) {
    tracing::debug!(
        config_path = %app.config_path.display(),
        "application config:\n{}",
        app
    );
}
