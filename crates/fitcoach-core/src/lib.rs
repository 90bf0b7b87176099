//! # FitCoach Core
//!
//! Shell state that does not depend on a renderer.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Application shell                    │
//! │  ┌────────────┐  ┌───────────────┐  ┌──────────────────┐  │
//! │  │  AppConfig │  │ SessionAuth   │  │  LiveConfigBus   │  │
//! │  └────────────┘  └───────────────┘  └────────▲─────────┘  │
//! │                                              │ publish    │
//! │  ┌──────────────────────┐     ┌──────────────┴─────────┐  │
//! │  │ SettingsStore (trait)│────►│    SettingsWatcher     │  │
//! │  │  memory / json file  │     └────────────────────────┘  │
//! │  └──────────────────────┘                                 │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod event;
pub mod language;
pub mod settings;
pub mod watcher;

pub use auth::{SessionAuthState, User};
pub use config::{AppConfig, ConfigError};
pub use event::{Channel, ConfigEvent, LiveConfigBus, SubscriptionGuard};
pub use language::{Language, TextDirection};
pub use settings::{
    BackgroundSetting, BannerSetting, JsonFileSettings, MemorySettings, SettingKey,
    SettingsError, SettingsStore,
};
pub use watcher::{SettingsSnapshot, SettingsWatcher};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
