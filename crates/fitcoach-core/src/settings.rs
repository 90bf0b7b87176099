//! Access to persisted application settings.
//!
//! The settings service is an external key-value store. The shell asks it
//! for three keys and treats a failed read exactly like a missing value:
//! the feature stays at its default and nothing is shown to the user.
//!
//! ## Learning: Object-Safe Async Traits
//!
//! `async fn` in a trait makes the trait unusable as `dyn`. Returning a
//! boxed future keeps `Arc<dyn SettingsStore>` possible, and the `'static`
//! bound lets the future outlive the borrow of the store.

use std::collections::HashMap;
use std::fmt;
use std::future::{self, Future};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use fitcoach_style::ThemeConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CoreError;

/// Future returned by [`SettingsStore::get_setting`].
pub type SettingFuture = Pin<Box<dyn Future<Output = Option<Value>> + Send + 'static>>;

/// Future returned by the typed loaders.
pub type LoadFuture<T> = Pin<Box<dyn Future<Output = Option<T>> + Send + 'static>>;

/// Result type for settings file operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// The settings keys the shell reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    ThemeColors,
    AnnouncementBanner,
    BackgroundImage,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [
        SettingKey::ThemeColors,
        SettingKey::AnnouncementBanner,
        SettingKey::BackgroundImage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::ThemeColors => "themeColors",
            SettingKey::AnnouncementBanner => "announcementBanner",
            SettingKey::BackgroundImage => "backgroundImage",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSetting(s.to_string()))
    }
}

/// Payload of the `announcementBanner` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSetting {
    pub message: String,
    pub enabled: bool,
}

/// Payload of the `backgroundImage` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSetting {
    pub url: Option<String>,
}

impl BackgroundSetting {
    /// The URL, treating an empty string as unset.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// A key-value settings service.
///
/// Implementations never fail: anything that goes wrong is logged and
/// reported as `None`.
pub trait SettingsStore: Send + Sync {
    /// Reads the raw JSON value stored under `key`.
    fn get_setting(&self, key: &str) -> SettingFuture;
}

fn decode<T: DeserializeOwned>(key: SettingKey, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(%err, %key, "Ignoring malformed setting");
            None
        }
    }
}

/// Decodes and validates a raw `themeColors` value.
pub fn decode_theme(value: Value) -> Option<ThemeConfig> {
    let theme: ThemeConfig = decode(SettingKey::ThemeColors, value)?;
    Some(theme.sanitized())
}

pub fn decode_banner(value: Value) -> Option<BannerSetting> {
    decode(SettingKey::AnnouncementBanner, value)
}

pub fn decode_background(value: Value) -> Option<BackgroundSetting> {
    decode(SettingKey::BackgroundImage, value)
}

/// Reads and validates the `themeColors` setting.
pub fn load_theme(store: &dyn SettingsStore) -> LoadFuture<ThemeConfig> {
    let read = store.get_setting(SettingKey::ThemeColors.as_str());
    Box::pin(async move { decode_theme(read.await?) })
}

/// Reads the `announcementBanner` setting.
pub fn load_banner(store: &dyn SettingsStore) -> LoadFuture<BannerSetting> {
    let read = store.get_setting(SettingKey::AnnouncementBanner.as_str());
    Box::pin(async move { decode_banner(read.await?) })
}

/// Reads the `backgroundImage` setting.
pub fn load_background(store: &dyn SettingsStore) -> LoadFuture<BackgroundSetting> {
    let read = store.get_setting(SettingKey::BackgroundImage.as_str());
    Box::pin(async move { decode_background(read.await?) })
}

/// In-memory settings, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, key: SettingKey, value: Value) -> Self {
        self.put(key.as_str(), value);
        self
    }

    pub fn put(&self, key: &str, value: Value) {
        match self.values.write() {
            Ok(mut values) => {
                values.insert(key.to_string(), value);
            }
            Err(_) => tracing::warn!(key, "Settings lock poisoned; dropping write"),
        }
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().ok()?.remove(key)
    }
}

impl SettingsStore for MemorySettings {
    fn get_setting(&self, key: &str) -> SettingFuture {
        let value = self
            .values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned());
        Box::pin(future::ready(value.filter(|v| !v.is_null())))
    }
}

/// Settings stored as one JSON object in a file.
///
/// ```json
/// { "themeColors": { "primaryColor": "#22c55e" },
///   "announcementBanner": { "message": "New plans!", "enabled": true } }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `value` under `key`, keeping the other keys.
    pub async fn put(&self, key: &str, value: Value) -> SettingsResult<()> {
        let mut map = match read_object(&self.path).await {
            Ok(map) => map,
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err),
        };
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        tokio::fs::write(&self.path, content).await?;

        tracing::info!(key, path = %self.path.display(), "Setting written");
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get_setting(&self, key: &str) -> SettingFuture {
        let path = self.path.clone();
        let key = key.to_string();
        Box::pin(async move {
            match read_object(&path).await {
                Ok(mut map) => map.remove(&key).filter(|v| !v.is_null()),
                Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "No settings file");
                    None
                }
                Err(err) => {
                    tracing::warn!(%err, key = %key, "Settings read failed");
                    None
                }
            }
        })
    }
}

async fn read_object(path: &Path) -> SettingsResult<Map<String, Value>> {
    let content = tokio::fs::read_to_string(path).await?;
    match serde_json::from_str(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(SettingsError::NotAnObject(path.to_path_buf())),
    }
}

/// Settings file errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemorySettings::new().with(
            SettingKey::ThemeColors,
            json!({ "primaryColor": "#112233" }),
        );

        let theme = load_theme(&store).await.unwrap();
        assert_eq!(theme.primary_color.as_deref(), Some("#112233"));
        assert!(load_banner(&store).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_absent() {
        let store = MemorySettings::new()
            .with(SettingKey::AnnouncementBanner, json!("not an object"))
            .with(SettingKey::BackgroundImage, Value::Null);

        assert!(load_banner(&store).await.is_none());
        assert!(load_background(&store).await.is_none());
    }

    #[tokio::test]
    async fn test_theme_is_sanitized_on_load() {
        let store = MemorySettings::new().with(
            SettingKey::ThemeColors,
            json!({ "primaryColor": "oops", "textColor": "#ffffff" }),
        );

        let theme = load_theme(&store).await.unwrap();
        assert!(theme.primary_color.is_none());
        assert_eq!(theme.text_color.as_deref(), Some("#ffffff"));
    }

    #[tokio::test]
    async fn test_json_file_missing_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettings::new(dir.path().join("settings.json"));
        assert!(store.get_setting("themeColors").await.is_none());
    }

    #[tokio::test]
    async fn test_json_file_put_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSettings::new(dir.path().join("data").join("settings.json"));

        store
            .put(
                SettingKey::AnnouncementBanner.as_str(),
                json!({ "message": "Ramadan schedule", "enabled": true }),
            )
            .await
            .unwrap();
        store
            .put(
                SettingKey::BackgroundImage.as_str(),
                json!({ "url": "https://cdn.example.com/gym.jpg" }),
            )
            .await
            .unwrap();

        let banner = load_banner(&store).await.unwrap();
        assert_eq!(banner.message, "Ramadan schedule");
        assert!(banner.enabled);

        let background = load_background(&store).await.unwrap();
        assert_eq!(background.url(), Some("https://cdn.example.com/gym.jpg"));
    }

    #[tokio::test]
    async fn test_json_file_garbage_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = JsonFileSettings::new(&path);
        assert!(store.get_setting("themeColors").await.is_none());
        assert!(matches!(
            store.put("themeColors", json!({})).await,
            Err(SettingsError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_background_empty_url() {
        let setting = BackgroundSetting {
            url: Some("  ".to_string()),
        };
        assert_eq!(setting.url(), None);
    }

    #[test]
    fn test_setting_key_parse() {
        assert_eq!(
            "announcementBanner".parse::<SettingKey>().unwrap(),
            SettingKey::AnnouncementBanner
        );
        assert!("colors".parse::<SettingKey>().is_err());
    }
}
