// dbapi - database API tool
// Copyright (c) 2025 dbapi Contributors
// Licensed under the MIT License

//! # dbapi
//!
//! dbapi resolves one immutable configuration snapshot at startup and hands
//! it, together with a logger built from it, to the command being run.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration resolution and the snapshot
//! - [`domain`] - Error types and the result alias
//! - [`logging`] - Logger construction from the snapshot
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbapi::config::{CliOnlyOptions, Resolver};
//! use dbapi::logging::LogHandle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cli = CliOnlyOptions {
//!     verbosity: 2,
//!     ..Default::default()
//! };
//! let app = Resolver::new().resolve(cli)?;
//! let log = LogHandle::from_config(&app)?;
//!
//! log.in_scope(|| tracing::debug!(host = %app.database.host, "Connecting"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolution Order
//!
//! Discovery picks the file layer: an explicit `--config` path (or the dev
//! config under `--dev`) is read as-is; otherwise `/etc/dbapi/dbapi.<ext>` and
//! then `~/.dbapi.<ext>` are tried. The layers are merged as
//! defaults < file < `DBAPI_*` environment < `--quiet`, materialized, and then
//! each section validates and derives its own values.
//!
//! ## Error Handling
//!
//! Resolution reports [`domain::ConfigError`], which tells a missing file
//! apart from a corrupt or invalid one. Everything else uses
//! [`domain::AppError`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
