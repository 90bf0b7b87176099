//! Shell configuration.
//!
//! Loaded from `config.toml` in the platform config directory. Every section
//! is `#[serde(default)]`, so a partial file (or no file) still yields a
//! complete config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;

/// Main shell configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window and language settings
    pub shell: ShellConfig,

    /// Where persisted settings live
    pub settings: SettingsConfig,

    /// Demo session standing in for the external auth store
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads config from the default location.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_else(|err| {
            tracing::warn!(%err, "Falling back to default config");
            Self::default()
        })
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("fitcoach").join("config.toml"))
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved path of the JSON settings file.
    pub fn settings_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.settings.path {
            Some(path) => Ok(path.clone()),
            None => {
                let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
                Ok(data_dir.join("fitcoach").join("settings.json"))
            }
        }
    }
}

/// Window and language configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Language selected at startup
    pub language: Language,

    /// Seconds between settings polls (0 disables live updates)
    pub settings_poll_secs: u64,

    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            language: Language::Ar,
            settings_poll_secs: 5,
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

/// Settings storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// JSON settings file (defaults to the platform data directory)
    pub path: Option<PathBuf>,
}

/// Session profile used in place of a real sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub authenticated: bool,
    pub verified: bool,
    pub coach: bool,
    pub new_user: bool,
    pub name: String,
    pub email: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            authenticated: true,
            verified: true,
            coach: false,
            new_user: false,
            name: "Trainee".to_string(),
            email: "trainee@example.com".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Data directory not found")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.shell.language, Language::Ar);
        assert_eq!(config.shell.settings_poll_secs, 5);
        assert!(config.session.authenticated);
        assert!(!config.session.coach);
    }

    #[test]
    fn test_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [shell]
            language = "en"

            [session]
            coach = true
            "#,
        )
        .unwrap();
        assert_eq!(config.shell.language, Language::En);
        assert_eq!(config.shell.window_width, 1280.0);
        assert!(config.session.coach);
        assert!(config.session.verified);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.settings.path = Some(dir.path().join("settings.json"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.settings.path, config.settings.path);
        assert_eq!(
            loaded.settings_path().unwrap(),
            dir.path().join("settings.json")
        );
    }
}
