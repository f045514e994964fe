//! CLI command implementations
//!
//! Every command receives the installed configuration snapshot and the
//! logger handle built from it.

pub mod config;
pub mod version;
