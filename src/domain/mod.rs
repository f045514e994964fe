//! Domain types shared across dbapi.
//!
//! The domain layer currently holds the error hierarchy and the [`Result`]
//! alias. Configuration resolution reports [`ConfigError`]; everything at the
//! process level reports [`AppError`].

pub mod errors;
pub mod result;

pub use errors::{AppError, ConfigError};
pub use result::Result;
