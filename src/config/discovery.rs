//! Configuration file discovery
//!
//! An explicit path is read as-is and any failure is fatal. Without one, the
//! search locations are tried in order and the first file found wins:
//!
//! 1. `/etc/dbapi/dbapi.<ext>`
//! 2. `~/.dbapi.<ext>`
//!
//! A missing file moves on to the next location. A file that exists but is
//! malformed or unreadable stops the search with an error.

use super::sections::APPLICATION_NAME;
use crate::domain::errors::ConfigError;
use config::{Config, File, FileFormat};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Extensions probed at every search location, in order
pub const SEARCH_EXTENSIONS: &[&str] = &["yaml", "yml", "toml", "json"];

/// A configuration file that was found and parsed
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Path the contents were read from
    pub path: PathBuf,

    /// Parsed contents, ready to be layered into the merge store
    pub contents: Config,
}

/// One directory searched for a config file named `<stem>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    dir: PathBuf,
    stem: String,
}

impl SearchLocation {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// Every file path this location probes, in probe order
    pub fn candidates(&self) -> Vec<PathBuf> {
        SEARCH_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", self.stem, ext)))
            .collect()
    }

    /// Returns the first candidate that exists, or `None` if none do
    fn probe(&self) -> Result<Option<ConfigFile>, ConfigError> {
        for path in self.candidates() {
            match fs::read_to_string(&path) {
                Ok(contents) => return parse_config(&path, &contents).map(Some),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    trace!(path = %path.display(), "No config file at candidate");
                }
                Err(e) => return Err(read_error(&path, e)),
            }
        }
        Ok(None)
    }
}

/// Ordered list of search locations used when no explicit path is given
#[derive(Debug, Clone)]
pub struct Discovery {
    locations: Vec<SearchLocation>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new()
    }
}

impl Discovery {
    /// Standard search order: system directory, then the home directory
    ///
    /// The home location is left out when the home directory is unknown.
    pub fn new() -> Self {
        let mut locations = vec![SearchLocation::new(
            Path::new("/etc").join(APPLICATION_NAME),
            APPLICATION_NAME,
        )];
        if let Some(home) = dirs::home_dir() {
            locations.push(SearchLocation::new(home, format!(".{APPLICATION_NAME}")));
        }
        Self { locations }
    }

    /// Custom search order (for testing)
    pub fn with_locations(locations: Vec<SearchLocation>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[SearchLocation] {
        &self.locations
    }

    /// Finds and parses the config file backing the file layer
    ///
    /// # Errors
    ///
    /// - any read or parse failure of an explicit path, with no fallback
    /// - [`ConfigError::Parse`] or [`ConfigError::PermissionDenied`] for a
    ///   search candidate that exists but cannot be used
    /// - [`ConfigError::NotFound`] when every search location is exhausted
    pub fn discover(&self, explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
        match explicit {
            Some(path) => read_explicit(path),
            None => self.search(),
        }
    }

    fn search(&self) -> Result<ConfigFile, ConfigError> {
        for location in &self.locations {
            if let Some(found) = location.probe()? {
                debug!(path = %found.path.display(), "Discovered application config");
                return Ok(found);
            }
        }

        Err(ConfigError::NotFound {
            searched: self
                .locations
                .iter()
                .flat_map(SearchLocation::candidates)
                .collect(),
        })
    }
}

/// Reads exactly `path`; the caller asked for this file specifically
pub fn read_explicit(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    debug!(path = %path.display(), "Reading explicit application config");
    parse_config(path, &contents)
}

fn read_error(path: &Path, err: std::io::Error) -> ConfigError {
    match err.kind() {
        ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

/// Maps a file extension onto the format used to parse it
pub fn file_format(path: &Path) -> Option<FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => Some(FileFormat::Yaml),
        "toml" => Some(FileFormat::Toml),
        "json" => Some(FileFormat::Json),
        _ => None,
    }
}

fn parse_config(path: &Path, contents: &str) -> Result<ConfigFile, ConfigError> {
    let format = file_format(path).ok_or_else(|| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: "unsupported config type (expected yaml, yml, toml or json)".to_string(),
    })?;

    let parsed = Config::builder()
        .add_source(File::from_str(contents, format))
        .build()
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(ConfigFile {
        path: path.to_path_buf(),
        contents: parsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn two_locations(first: &TempDir, second: &TempDir) -> Discovery {
        Discovery::with_locations(vec![
            SearchLocation::new(first.path(), "dbapi"),
            SearchLocation::new(second.path(), ".dbapi"),
        ])
    }

    #[test]
    fn test_default_search_starts_with_system_dir() {
        let discovery = Discovery::new();
        let first = &discovery.locations()[0];
        assert_eq!(
            first.candidates()[0],
            PathBuf::from("/etc/dbapi/dbapi.yaml")
        );
    }

    #[test]
    fn test_candidates_follow_extension_order() {
        let location = SearchLocation::new("/home/u", ".dbapi");
        assert_eq!(
            location.candidates(),
            vec![
                PathBuf::from("/home/u/.dbapi.yaml"),
                PathBuf::from("/home/u/.dbapi.yml"),
                PathBuf::from("/home/u/.dbapi.toml"),
                PathBuf::from("/home/u/.dbapi.json"),
            ]
        );
    }

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(file_format(Path::new("a.yml")), Some(FileFormat::Yaml));
        assert_eq!(file_format(Path::new("a.YAML")), Some(FileFormat::Yaml));
        assert_eq!(file_format(Path::new("a.toml")), Some(FileFormat::Toml));
        assert_eq!(file_format(Path::new("a.json")), Some(FileFormat::Json));
        assert_eq!(file_format(Path::new("a.ini")), None);
        assert_eq!(file_format(Path::new("noext")), None);
    }

    #[test]
    fn test_permission_denied_is_distinct() {
        let path = Path::new("/etc/dbapi/dbapi.yaml");
        let err = read_error(path, std::io::Error::from(ErrorKind::PermissionDenied));
        match err {
            ConfigError::PermissionDenied { path: denied } => assert_eq!(denied, path),
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
    }

    #[test]
    fn test_other_io_failure_is_read_error() {
        let path = Path::new("/etc/dbapi/dbapi.yaml");
        let err = read_error(path, std::io::Error::from(ErrorKind::Other));
        assert!(matches!(err, ConfigError::Read { path: p, .. } if p == path));
    }

    #[test]
    fn test_explicit_missing_file_is_fatal() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".dbapi.yaml"), "quiet: true\n").unwrap();

        let missing = system.path().join("missing.yaml");
        let err = two_locations(&system, &home)
            .discover(Some(&missing))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_explicit_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "log: [unterminated\n").unwrap();

        let err = read_explicit(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_explicit_unsupported_extension_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dbapi.conf");
        fs::write(&path, "quiet = true\n").unwrap();

        let err = read_explicit(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_first_location_wins() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(system.path().join("dbapi.yaml"), "quiet: true\n").unwrap();
        fs::write(home.path().join(".dbapi.yaml"), "quiet: false\n").unwrap();

        let found = two_locations(&system, &home).discover(None).unwrap();
        assert_eq!(found.path, system.path().join("dbapi.yaml"));
        assert!(found.contents.get_bool("quiet").unwrap());
    }

    #[test]
    fn test_falls_back_to_home_location() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join(".dbapi.toml"),
            "[database]\nport = 5432\n",
        )
        .unwrap();

        let found = two_locations(&system, &home).discover(None).unwrap();
        assert_eq!(found.path, home.path().join(".dbapi.toml"));
        assert_eq!(found.contents.get_int("database.port").unwrap(), 5432);
    }

    #[test]
    fn test_yaml_probed_before_toml() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(system.path().join("dbapi.toml"), "quiet = false\n").unwrap();
        fs::write(system.path().join("dbapi.yaml"), "quiet: true\n").unwrap();

        let found = two_locations(&system, &home).discover(None).unwrap();
        assert_eq!(found.path, system.path().join("dbapi.yaml"));
    }

    #[test]
    fn test_malformed_fallback_does_not_skip() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(system.path().join("dbapi.json"), "{ not json").unwrap();
        fs::write(home.path().join(".dbapi.yaml"), "quiet: true\n").unwrap();

        let err = two_locations(&system, &home).discover(None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_exhausted_search_is_not_found() {
        let system = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();

        let err = two_locations(&system, &home).discover(None).unwrap_err();
        match err {
            ConfigError::NotFound { searched } => {
                assert_eq!(searched.len(), 2 * SEARCH_EXTENSIONS.len());
                assert_eq!(searched[0], system.path().join("dbapi.yaml"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
