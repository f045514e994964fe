//! Logger construction from the resolved configuration
//!
//! The logger is an explicit [`LogHandle`] built from the finished snapshot.
//! It is never installed as the global default subscriber; callers activate
//! it for a scope with [`LogHandle::enter`] or [`LogHandle::in_scope`].
//!
//! # Example
//!
//! ```no_run
//! use dbapi::config::Application;
//! use dbapi::logging::LogHandle;
//!
//! let app = Application::default();
//! let log = LogHandle::from_config(&app).expect("Failed to initialize logging");
//! log.in_scope(|| tracing::info!("Application started"));
//! ```

use crate::config::Application;
use crate::domain::{AppError, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger handle passed to every subsystem that logs
///
/// Dropping the handle flushes the file writer.
pub struct LogHandle {
    dispatch: Dispatch,
    console_enabled: bool,
    file_enabled: bool,
    _file_guard: Option<WorkerGuard>,
}

impl LogHandle {
    /// Builds the logger described by the snapshot's `log` section
    ///
    /// - console output follows [`LoggingSection::console_enabled`]
    /// - file output is enabled when `log.file` is set; the file is created
    ///   if missing and appended to otherwise
    /// - `log.structured` switches both outputs to JSON
    ///
    /// [`LoggingSection::console_enabled`]: crate::config::LoggingSection::console_enabled
    pub fn from_config(app: &Application) -> Result<Self> {
        let level = app.log.effective_level.to_level_filter();
        let structured = app.log.structured;
        let console_enabled = app
            .log
            .console_enabled(app.cli_options.verbosity, app.quiet);

        let mut layers: Vec<BoxedLayer> = Vec::new();

        if console_enabled {
            layers.push(console_layer(structured, level));
        }

        let file_guard = match app.log.file.as_deref() {
            Some(path) => {
                let (writer, guard) = open_log_file(path)?;
                layers.push(file_layer(writer, structured, level));
                Some(guard)
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry().with(layers);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            console_enabled,
            file_enabled: file_guard.is_some(),
            _file_guard: file_guard,
        })
    }

    /// Makes this logger the current thread's default until the guard drops
    pub fn enter(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }

    /// Runs `f` with this logger as the current default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    pub fn console_enabled(&self) -> bool {
        self.console_enabled
    }

    pub fn file_enabled(&self) -> bool {
        self.file_enabled
    }
}

fn console_layer(structured: bool, level: LevelFilter) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if structured {
        layer.json().with_filter(level).boxed()
    } else {
        layer.with_filter(level).boxed()
    }
}

fn file_layer(writer: NonBlocking, structured: bool, level: LevelFilter) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    if structured {
        layer.json().with_filter(level).boxed()
    } else {
        layer.with_filter(level).boxed()
    }
}

fn open_log_file(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Logging(format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::Logging(format!("Failed to open log file {}: {}", path.display(), e))
        })?;

    Ok(tracing_appender::non_blocking(file))
}
