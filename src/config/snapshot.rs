//! Process-wide configuration snapshot
//!
//! The resolved [`Application`] is installed exactly once during startup and
//! is read-only afterwards.

use super::schema::Application;
use crate::domain::errors::ConfigError;
use std::sync::OnceLock;

static SNAPSHOT: OnceLock<Application> = OnceLock::new();

/// Installs the snapshot into process-wide state
///
/// Fails with [`ConfigError::AlreadyInstalled`] if a snapshot already exists.
pub fn install(app: Application) -> Result<&'static Application, ConfigError> {
    install_into(&SNAPSHOT, app)
}

fn install_into(
    cell: &'static OnceLock<Application>,
    app: Application,
) -> Result<&'static Application, ConfigError> {
    cell.set(app).map_err(|_| ConfigError::AlreadyInstalled)?;
    cell.get().ok_or(ConfigError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_once() {
        static CELL: OnceLock<Application> = OnceLock::new();

        let mut first = Application::default();
        first.database.dbname = "first".to_string();
        let installed = install_into(&CELL, first).unwrap();
        assert_eq!(installed.database.dbname, "first");

        let mut second = Application::default();
        second.database.dbname = "second".to_string();
        let err = install_into(&CELL, second).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyInstalled));
        assert_eq!(CELL.get().unwrap().database.dbname, "first");
    }
}
