//! Persistent CLI defaults.

use std::env;
use std::path::{Path, PathBuf};

use credsync_core::export::ExportFormat;
use credsync_core::util::normalize_text_option;
use credsync_core::MergeDirection;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
const SESSION_FILE_NAME: &str = "session.json";

pub const SESSION_ENV: &str = "CREDSYNC_SESSION";
pub const DIRECTION_ENV: &str = "CREDSYNC_DIRECTION";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub default_direction: Option<MergeDirection>,
    #[serde(default)]
    pub default_export_format: Option<ExportFormat>,
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("credsync").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn default_session_path() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|dir| dir.join("credsync").join(SESSION_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI data directory".to_string())
}

fn normalize_path_option(value: Option<PathBuf>) -> Option<PathBuf> {
    let value = value?;
    normalize_text_option(Some(value.to_string_lossy().into_owned())).map(PathBuf::from)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Flag, then `CREDSYNC_SESSION`, then config, then the data directory.
    pub fn resolve_session_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf, String> {
        self.resolve_session_path_with(explicit, env::var_os(SESSION_ENV).map(PathBuf::from))
    }

    pub fn resolve_session_path_with(
        &self,
        explicit: Option<PathBuf>,
        from_env: Option<PathBuf>,
    ) -> Result<PathBuf, String> {
        if let Some(path) = normalize_path_option(explicit)
            .or_else(|| normalize_path_option(from_env))
            .or_else(|| normalize_path_option(self.session_path.clone()))
        {
            return Ok(path);
        }
        default_session_path()
    }

    /// Flag, then `CREDSYNC_DIRECTION`, then config, then bidirectional.
    pub fn resolve_direction(
        &self,
        explicit: Option<MergeDirection>,
    ) -> Result<MergeDirection, String> {
        self.resolve_direction_with(explicit, env::var(DIRECTION_ENV).ok())
    }

    pub fn resolve_direction_with(
        &self,
        explicit: Option<MergeDirection>,
        from_env: Option<String>,
    ) -> Result<MergeDirection, String> {
        if let Some(direction) = explicit {
            return Ok(direction);
        }
        if let Some(value) = normalize_text_option(from_env) {
            return value
                .parse::<MergeDirection>()
                .map_err(|error| format!("{DIRECTION_ENV}: {error}"));
        }
        Ok(self.default_direction.unwrap_or_default())
    }

    pub fn resolve_export_format(&self, explicit: Option<ExportFormat>) -> ExportFormat {
        explicit
            .or(self.default_export_format)
            .unwrap_or_default()
    }

    fn normalize(&mut self) {
        self.version = default_config_version();
        self.session_path = normalize_path_option(self.session_path.take());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn config_roundtrip_normalizes_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = CliConfig {
            version: 0,
            default_direction: Some(MergeDirection::BToA),
            default_export_format: Some(ExportFormat::Google),
            session_path: Some(PathBuf::from("  /tmp/credsync/session.json  ")),
        };

        config.save_to_path(&path).unwrap();
        let loaded = CliConfig::load_from_path(&path).unwrap();

        assert_eq!(
            loaded,
            CliConfig {
                version: 1,
                default_direction: Some(MergeDirection::BToA),
                default_export_format: Some(ExportFormat::Google),
                session_path: Some(PathBuf::from("/tmp/credsync/session.json")),
            }
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"default_direction\": \"b-to-a\""));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CliConfig::load_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.default_direction, None);
        assert_eq!(loaded.session_path, None);
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        let error = CliConfig::load_from_path(&path).unwrap_err();
        assert!(error.starts_with("Failed to parse config"));
    }

    #[test]
    fn session_path_prefers_flag_then_env_then_config() {
        let config = CliConfig {
            session_path: Some(PathBuf::from("/config/session.json")),
            ..CliConfig::default()
        };

        assert_eq!(
            config
                .resolve_session_path_with(
                    Some(PathBuf::from("/flag.json")),
                    Some(PathBuf::from("/env.json"))
                )
                .unwrap(),
            PathBuf::from("/flag.json")
        );
        assert_eq!(
            config
                .resolve_session_path_with(None, Some(PathBuf::from("/env.json")))
                .unwrap(),
            PathBuf::from("/env.json")
        );
        assert_eq!(
            config
                .resolve_session_path_with(None, Some(PathBuf::from("  ")))
                .unwrap(),
            PathBuf::from("/config/session.json")
        );
    }

    #[test]
    fn direction_prefers_flag_then_env_then_config() {
        let config = CliConfig {
            default_direction: Some(MergeDirection::BToA),
            ..CliConfig::default()
        };

        assert_eq!(
            config
                .resolve_direction_with(Some(MergeDirection::AToB), Some("b-to-a".to_string()))
                .unwrap(),
            MergeDirection::AToB
        );
        assert_eq!(
            config
                .resolve_direction_with(None, Some("bidirectional".to_string()))
                .unwrap(),
            MergeDirection::Bidirectional
        );
        assert_eq!(
            config.resolve_direction_with(None, None).unwrap(),
            MergeDirection::BToA
        );
        assert_eq!(
            CliConfig::default().resolve_direction_with(None, None).unwrap(),
            MergeDirection::Bidirectional
        );
    }

    #[test]
    fn invalid_direction_env_is_an_error() {
        let error = CliConfig::default()
            .resolve_direction_with(None, Some("sideways".to_string()))
            .unwrap_err();
        assert!(error.starts_with(DIRECTION_ENV));
    }

    #[test]
    fn export_format_falls_back_to_generic() {
        let config = CliConfig {
            default_export_format: Some(ExportFormat::Apple),
            ..CliConfig::default()
        };
        assert_eq!(
            config.resolve_export_format(Some(ExportFormat::Google)),
            ExportFormat::Google
        );
        assert_eq!(config.resolve_export_format(None), ExportFormat::Apple);
        assert_eq!(
            CliConfig::default().resolve_export_format(None),
            ExportFormat::Generic
        );
    }
}
