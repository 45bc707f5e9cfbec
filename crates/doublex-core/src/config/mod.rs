//! Configuration management for doublex.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default`, so a missing file (or a
//! missing section) behaves exactly like the stock settings.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for doublex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pair generation settings
    pub pairing: PairingConfig,

    /// Compositing settings
    pub compose: ComposeConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Progress reporting settings
    pub progress: ProgressConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.doublex.doublex/config.toml
    /// - Linux: ~/.config/doublex/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\doublex\config\config.toml
    ///
    /// Falls back to ~/.doublex/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "doublex", "doublex")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".doublex").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pairing.supported_formats, vec!["jpg", "jpeg"]);
        assert_eq!(config.compose.brightness, 0.5);
        assert_eq!(config.compose.resize_divisor, 5);
        assert_eq!(config.limits.max_file_size_mb, 100);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[pairing]"));
        assert!(toml.contains("[compose]"));
        assert!(toml.contains("[progress]"));
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[compose]\njpeg_quality = 90\n\n[progress]\nmode = \"verbose\"\n")
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.compose.jpeg_quality, 90);
        assert_eq!(config.compose.resize_divisor, 5);
        assert_eq!(config.progress.mode, crate::types::ProgressMode::Verbose);
        assert!(config.pairing.seed.is_none());
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[compose]\nresize_divisor = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("resize_divisor"));
    }

    #[test]
    fn test_load_from_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[compose\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_expand_path_without_tilde_is_unchanged() {
        assert_eq!(expand_path("/tmp/photos"), PathBuf::from("/tmp/photos"));
    }
}
