//! Shell-owned state: announcement banner, background image and document
//! attributes.

use fitcoach_core::{BackgroundSetting, BannerSetting, Language, TextDirection};

/// Opacity of the black scrim drawn over a background image.
pub const SCRIM_OPACITY: f32 = 0.6;

/// Whether the banner is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerVisibility {
    #[default]
    Hidden,
    Visible,
}

/// Announcement banner.
///
/// ```text
///            load/live enabled=true
///   Hidden ─────────────────────────► Visible
///     ▲  ◄───────────────────────────   │
///     │   load/live enabled=false       │
///     └──────────── dismiss ────────────┘
/// ```
///
/// A dismissal lasts for the session only; the next enabled event reopens
/// the banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerState {
    setting: Option<BannerSetting>,
    visibility: BannerVisibility,
}

impl BannerState {
    /// Applies the startup read. `None` means the setting is absent.
    pub fn on_loaded(&mut self, setting: Option<BannerSetting>) {
        match setting {
            Some(setting) if setting.enabled => {
                self.setting = Some(setting);
                self.visibility = BannerVisibility::Visible;
            }
            _ => {
                self.setting = None;
                self.visibility = BannerVisibility::Hidden;
            }
        }
    }

    /// Applies a `bannerChanged` event.
    pub fn on_live(&mut self, setting: BannerSetting) {
        self.on_loaded(Some(setting));
    }

    pub fn dismiss(&mut self) {
        self.visibility = BannerVisibility::Hidden;
    }

    pub fn visibility(&self) -> BannerVisibility {
        self.visibility
    }

    pub fn setting(&self) -> Option<&BannerSetting> {
        self.setting.as_ref()
    }

    /// Text to render, if any. A visible banner with an empty message
    /// renders nothing.
    pub fn visible_message(&self) -> Option<&str> {
        if self.visibility != BannerVisibility::Visible {
            return None;
        }
        self.setting
            .as_ref()
            .map(|s| s.message.as_str())
            .filter(|message| !message.is_empty())
    }
}

/// Background image behind the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundState {
    url: Option<String>,
}

impl BackgroundState {
    /// Applies the startup read; an absent or empty URL keeps the current one.
    pub fn on_loaded(&mut self, setting: Option<BackgroundSetting>) {
        if let Some(url) = setting.as_ref().and_then(BackgroundSetting::url) {
            self.url = Some(url.to_string());
        }
    }

    /// Applies a `backgroundChanged` event; an empty URL clears the image.
    pub fn on_live(&mut self, setting: BackgroundSetting) {
        self.url = setting.url().map(str::to_string);
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Root document attributes driven by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub lang: &'static str,
    pub dir: TextDirection,
    pub font_class: &'static str,
}

impl From<Language> for DocumentAttributes {
    fn from(language: Language) -> Self {
        Self {
            lang: language.code(),
            dir: language.direction(),
            font_class: language.font_class(),
        }
    }
}
