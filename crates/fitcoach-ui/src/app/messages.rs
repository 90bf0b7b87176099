use iced::Size;

use fitcoach_core::{SettingKey, SettingsSnapshot};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Navigate(String),
    Back,
    Forward,

    // Chrome
    ToggleLanguage,
    DismissBanner,
    ToggleMobileSidebar,
    CloseMobileSidebar,
    ToggleInbox,
    ToggleEditMode,
    FinishOnboarding,
    WindowResized(Size),

    // Session
    SignIn,
    SignOut,

    // Settings
    /// Raw result of one startup read
    SettingLoaded(SettingKey, Option<Value>),
    PollSettings,
    SettingsPolled(SettingsSnapshot),
}
