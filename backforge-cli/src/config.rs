//! Persisted project configuration (`cli.config.json`)
//!
//! `init` creates the file; every later command loads it once and passes the
//! value down to the generators. Updates are read-mutate-write, so keys this
//! tool does not know about are written back untouched.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::project::{DatabaseKind, ProjectKind};

/// File name of the persisted config, relative to the project root
pub const CONFIG_FILE: &str = "cli.config.json";

/// Errors raised while loading or using the project config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file does not exist (the project was never initialized)
    #[error("No cli.config.json found at {}. Run `backforge init` first.", .path.display())]
    Missing {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The config file exists but could not be parsed
    #[error("Malformed cli.config.json at {}: {source}", .path.display())]
    Malformed {
        /// Path of the malformed file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// The command needs an ORM and none has been chosen
    #[error("No database configured for this project. Run `backforge install:database` first.")]
    MissingDatabase,

    /// Any other I/O failure
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

/// The shape of a generated project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project kind chosen at `init`
    pub project: ProjectKind,

    /// Database chosen at `init` or by `install:database`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orm: Option<DatabaseKind>,

    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectConfig {
    /// Create a config for a freshly initialized project
    #[must_use]
    pub fn new(project: ProjectKind, orm: Option<DatabaseKind>) -> Self {
        Self {
            project,
            orm,
            extra: serde_json::Map::new(),
        }
    }

    /// Path of the config file under `root`
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load the config stored under `root`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the file does not exist and
    /// [`ConfigError::Malformed`] when it cannot be parsed.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing { path });
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Malformed { path, source })
    }

    /// Write the whole config to `root`, replacing any previous file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written.
    pub fn save(&self, root: &Path) -> Result<(), ConfigError> {
        let path = Self::path(root);
        let json = serde_json::to_string(self)
            .map_err(|source| ConfigError::Malformed { path: path.clone(), source })?;

        fs::write(&path, json).map_err(|source| ConfigError::Io { path: path.clone(), source })?;

        info!(path = %path.display(), project = %self.project, "wrote project config");
        Ok(())
    }

    /// The configured database, for commands that cannot run without one
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabase`] if no ORM has been chosen.
    pub const fn require_database(&self) -> Result<DatabaseKind, ConfigError> {
        match self.orm {
            Some(orm) => Ok(orm),
            None => Err(ConfigError::MissingDatabase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_compact_json() {
        let dir = TempDir::new().unwrap();
        ProjectConfig::new(ProjectKind::Api, Some(DatabaseKind::TypeOrm))
            .save(dir.path())
            .unwrap();

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(written, r#"{"project":"API","orm":"TypeOrm"}"#);
    }

    #[test]
    fn test_orm_is_omitted_when_unset() {
        let dir = TempDir::new().unwrap();
        ProjectConfig::new(ProjectKind::GraphQl, None).save(dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(written, r#"{"project":"GraphQL"}"#);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{"project":"Desktop"}"#).unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn test_unknown_keys_survive_rewrite() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"project":"Web","author":"someone"}"#,
        )
        .unwrap();

        let mut config = ProjectConfig::load(dir.path()).unwrap();
        config.orm = Some(DatabaseKind::Mongoose);
        config.save(dir.path()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap())
                .unwrap();
        assert_eq!(value["author"], "someone");
        assert_eq!(value["orm"], "Mongoose");
    }

    #[test]
    fn test_require_database() {
        let config = ProjectConfig::new(ProjectKind::Api, None);
        assert!(matches!(
            config.require_database(),
            Err(ConfigError::MissingDatabase)
        ));

        let config = ProjectConfig::new(ProjectKind::Api, Some(DatabaseKind::Mongoose));
        assert_eq!(config.require_database().unwrap(), DatabaseKind::Mongoose);
    }
}
