//! The application shell without a renderer.
//!
//! Owns the style store, the live configuration bus, the banner and
//! background state and the document language. The iced front end wraps a
//! `Shell` and renders from it; tests drive it directly.
//!
//! ## Learning: Lifecycle as Ownership
//!
//! Bus subscriptions are `SubscriptionGuard`s stored on the shell. Dropping
//! the shell (or calling [`Shell::unmount`]) drops the guards, and dropping a
//! guard unsubscribes. There is no separate teardown list to keep in sync.

use std::cell::RefCell;
use std::rc::Rc;

use fitcoach_core::settings::{load_background, load_banner, load_theme};
use fitcoach_core::{
    BackgroundSetting, BannerSetting, Channel, ConfigEvent, Language, LiveConfigBus,
    SettingsStore, SubscriptionGuard,
};
use fitcoach_style::{StyleStore, ThemeConfig, apply_theme};

use crate::state::{BackgroundState, BannerState, DocumentAttributes};

/// State the live handlers write to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chrome {
    pub banner: BannerState,
    pub background: BackgroundState,
}

pub struct Shell {
    styles: StyleStore,
    bus: LiveConfigBus,
    chrome: Rc<RefCell<Chrome>>,
    language: Language,
    subscriptions: Vec<SubscriptionGuard>,
}

impl Shell {
    /// Creates a shell with the dark default palette applied.
    pub fn new(language: Language) -> Self {
        let styles = StyleStore::new();
        apply_theme(&styles, &ThemeConfig::dark());
        Self::with_parts(styles, LiveConfigBus::new(), language)
    }

    /// Creates a shell around an existing store and bus.
    pub fn with_parts(styles: StyleStore, bus: LiveConfigBus, language: Language) -> Self {
        Self {
            styles,
            bus,
            chrome: Rc::new(RefCell::new(Chrome::default())),
            language,
            subscriptions: Vec::new(),
        }
    }

    /// Subscribes to the three live channels. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }

        let styles = self.styles.clone();
        let theme = self.bus.subscribe(Channel::ThemeChanged, move |event| {
            if let ConfigEvent::Theme(theme) = event {
                apply_theme(&styles, theme);
            }
        });

        let chrome = Rc::clone(&self.chrome);
        let banner = self.bus.subscribe(Channel::BannerChanged, move |event| {
            if let ConfigEvent::Banner(setting) = event {
                chrome.borrow_mut().banner.on_live(setting.clone());
            }
        });

        let chrome = Rc::clone(&self.chrome);
        let background = self.bus.subscribe(Channel::BackgroundChanged, move |event| {
            if let ConfigEvent::Background(setting) = event {
                chrome.borrow_mut().background.on_live(setting.clone());
            }
        });

        self.subscriptions = vec![theme, banner, background];
        tracing::info!("Shell mounted");
    }

    /// Drops every bus subscription.
    pub fn unmount(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        self.subscriptions.clear();
        tracing::info!("Shell unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Issues the three startup reads concurrently and applies each result
    /// as it arrives. Missing or malformed settings leave the defaults.
    pub async fn load_settings(&self, store: &dyn SettingsStore) {
        tokio::join!(
            async { self.apply_loaded_theme(load_theme(store).await) },
            async { self.apply_loaded_banner(load_banner(store).await) },
            async { self.apply_loaded_background(load_background(store).await) },
        );
    }

    pub fn apply_loaded_theme(&self, theme: Option<ThemeConfig>) {
        if let Some(theme) = theme {
            tracing::debug!("Applying stored theme");
            apply_theme(&self.styles, &theme);
        }
    }

    pub fn apply_loaded_banner(&self, banner: Option<BannerSetting>) {
        self.chrome.borrow_mut().banner.on_loaded(banner);
    }

    pub fn apply_loaded_background(&self, background: Option<BackgroundSetting>) {
        self.chrome.borrow_mut().background.on_loaded(background);
    }

    pub fn dismiss_banner(&self) {
        self.chrome.borrow_mut().banner.dismiss();
    }

    /// Switches language; direction, `lang` and font class follow at once.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            tracing::info!(%language, "Language changed");
            self.language = language;
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn document(&self) -> DocumentAttributes {
        DocumentAttributes::from(self.language)
    }

    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    pub fn bus(&self) -> &LiveConfigBus {
        &self.bus
    }

    pub fn banner_message(&self) -> Option<String> {
        self.chrome.borrow().banner.visible_message().map(str::to_string)
    }

    pub fn background_url(&self) -> Option<String> {
        self.chrome.borrow().background.url().map(str::to_string)
    }

    /// Copy of the banner and background state.
    pub fn chrome(&self) -> Chrome {
        self.chrome.borrow().clone()
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("language", &self.language)
            .field("mounted", &self.is_mounted())
            .field("chrome", &*self.chrome.borrow())
            .finish()
    }
}
