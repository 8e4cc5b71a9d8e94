//! Run settings merged from defaults, `schemacheck.yml` and command-line overrides

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::validation::{BackendKind, DEFAULT_MAX_DEPTH};

pub const CONFIG_FILE_NAME: &str = "schemacheck.yml";
pub const DEFAULT_SCHEMAS_DIR: &str = "schemas";
pub const DEFAULT_DATA_DIR: &str = "data/sample";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    Missing(PathBuf),

    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of `schemacheck.yml`; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub schemas_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub max_depth: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub schemas_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub root: PathBuf,
    pub schemas_dir: PathBuf,
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub max_depth: usize,
}

impl Settings {
    /// Merge overrides over the config file over defaults.
    ///
    /// An explicitly named config file must exist; the default one is optional.
    /// Like the directories, a relative config path is resolved against the root.
    pub fn resolve(overrides: &Overrides) -> Result<Self, ConfigError> {
        let root = overrides.root.clone().unwrap_or_else(|| PathBuf::from("."));

        let file = match overrides.config.as_ref().map(|path| root.join(path)) {
            Some(path) if !path.is_file() => return Err(ConfigError::Missing(path)),
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ConfigFile::load(&path)?
            }
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    debug!("Loading config from {}", path.display());
                    ConfigFile::load(&path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let schemas_dir = overrides
            .schemas_dir
            .clone()
            .or(file.schemas_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMAS_DIR));
        let data_dir = overrides
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            schemas_dir: root.join(schemas_dir),
            data_dir: root.join(data_dir),
            backend: overrides.backend.or(file.backend).unwrap_or_default(),
            max_depth: overrides
                .max_depth
                .or(file.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::resolve(&Overrides {
            root: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(settings.schemas_dir, temp_dir.path().join("schemas"));
        assert_eq!(settings.data_dir, temp_dir.path().join("data/sample"));
        assert_eq!(settings.backend, BackendKind::Builtin);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_config_file_then_overrides() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "schemas_dir: spec/schemas\ndata_dir: fixtures\nbackend: jsonschema\nmax_depth: 16\n",
        )
        .unwrap();

        let mut overrides = Overrides {
            root: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides).unwrap();
        assert_eq!(settings.schemas_dir, temp_dir.path().join("spec/schemas"));
        assert_eq!(settings.data_dir, temp_dir.path().join("fixtures"));
        assert_eq!(settings.backend, BackendKind::Jsonschema);
        assert_eq!(settings.max_depth, 16);

        overrides.data_dir = Some(PathBuf::from("other"));
        overrides.max_depth = Some(4);
        let settings = Settings::resolve(&overrides).unwrap();
        assert_eq!(settings.data_dir, temp_dir.path().join("other"));
        assert_eq!(settings.max_depth, 4);
        assert_eq!(settings.backend, BackendKind::Jsonschema);
    }

    #[test]
    fn test_unknown_config_keys_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yml");
        fs::write(&path, "schema_dir: typo\n").unwrap();

        let err = Settings::resolve(&Overrides {
            config: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_explicit_config_is_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("ci.yml"), "data_dir: fixtures\n").unwrap();

        let settings = Settings::resolve(&Overrides {
            root: Some(temp_dir.path().to_path_buf()),
            config: Some(PathBuf::from("ci.yml")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.data_dir, temp_dir.path().join("fixtures"));

        let err = Settings::resolve(&Overrides {
            root: Some(temp_dir.path().to_path_buf()),
            config: Some(PathBuf::from("absent.yml")),
            ..Default::default()
        })
        .unwrap_err();
        match err {
            ConfigError::Missing(path) => assert_eq!(path, temp_dir.path().join("absent.yml")),
            other => panic!("expected missing config, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let err = Settings::resolve(&Overrides {
            config: Some(temp_dir.path().join("absent.yml")),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }
}
