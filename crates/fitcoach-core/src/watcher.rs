//! Turns changes in the settings store into live configuration events.
//!
//! The settings service has no push channel, so the shell polls it. The
//! watcher remembers the raw value of each key the shell last applied and
//! publishes only the keys that changed since.

use std::collections::HashMap;

use fitcoach_style::ThemeConfig;
use serde_json::Value;

use crate::event::{ConfigEvent, LiveConfigBus};
use crate::settings::{BackgroundSetting, BannerSetting, SettingKey, SettingsStore};

/// Raw values of the three shell settings at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
    values: HashMap<SettingKey, Value>,
}

impl SettingsSnapshot {
    /// Reads all three keys concurrently.
    pub async fn fetch(store: &dyn SettingsStore) -> Self {
        let (theme, banner, background) = tokio::join!(
            store.get_setting(SettingKey::ThemeColors.as_str()),
            store.get_setting(SettingKey::AnnouncementBanner.as_str()),
            store.get_setting(SettingKey::BackgroundImage.as_str()),
        );

        let mut snapshot = Self::default();
        for (key, value) in [
            (SettingKey::ThemeColors, theme),
            (SettingKey::AnnouncementBanner, banner),
            (SettingKey::BackgroundImage, background),
        ] {
            if let Some(value) = value {
                snapshot.values.insert(key, value);
            }
        }
        snapshot
    }

    pub fn with(mut self, key: SettingKey, value: Value) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn get(&self, key: SettingKey) -> Option<&Value> {
        self.values.get(&key)
    }
}

/// Diffs polled snapshots against the values the shell has applied.
///
/// A key is only watched once its startup read has been recorded with
/// [`SettingsWatcher::record`]. Until then polls skip it, so a change that
/// lands before the shell applied anything is still published later.
#[derive(Debug, Default)]
pub struct SettingsWatcher {
    applied: HashMap<SettingKey, Option<Value>>,
}

impl SettingsWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the raw value the shell applied for `key`.
    pub fn record(&mut self, key: SettingKey, value: Option<Value>) {
        self.applied.insert(key, value);
    }

    /// Records every key of `snapshot` as applied.
    pub fn prime(&mut self, snapshot: &SettingsSnapshot) {
        for key in SettingKey::ALL {
            self.record(key, snapshot.get(key).cloned());
        }
    }

    /// Whether `key` has a recorded baseline.
    pub fn is_tracking(&self, key: SettingKey) -> bool {
        self.applied.contains_key(&key)
    }

    /// Returns the events for every tracked key whose value differs from
    /// the applied one, and records the new values.
    pub fn diff(&mut self, snapshot: SettingsSnapshot) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        for key in SettingKey::ALL {
            let Some(applied) = self.applied.get_mut(&key) else {
                continue;
            };
            let current = snapshot.get(key);
            if applied.as_ref() == current {
                continue;
            }
            *applied = current.cloned();
            events.extend(change_event(key, current));
        }
        events
    }

    /// Publishes every change on `bus`; returns how many events went out.
    pub fn publish_changes(&mut self, snapshot: SettingsSnapshot, bus: &LiveConfigBus) -> usize {
        let events = self.diff(snapshot);
        let count = events.len();
        for event in events {
            tracing::info!(channel = %event.channel(), "Settings changed");
            bus.publish(event);
        }
        count
    }
}

fn change_event(key: SettingKey, value: Option<&Value>) -> Option<ConfigEvent> {
    match key {
        // A removed theme cannot be un-applied; the current colors stay.
        SettingKey::ThemeColors => {
            let theme: ThemeConfig = serde_json::from_value(value?.clone()).ok()?;
            Some(ConfigEvent::Theme(theme.sanitized()))
        }
        SettingKey::AnnouncementBanner => {
            let banner = match value {
                Some(value) => serde_json::from_value(value.clone()).ok()?,
                None => BannerSetting::default(),
            };
            Some(ConfigEvent::Banner(banner))
        }
        SettingKey::BackgroundImage => {
            let background = match value {
                Some(value) => serde_json::from_value(value.clone()).ok()?,
                None => BackgroundSetting::default(),
            };
            Some(ConfigEvent::Background(background))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Channel;
    use crate::settings::MemorySettings;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_untracked_keys_are_skipped() {
        let mut watcher = SettingsWatcher::new();
        let snapshot = SettingsSnapshot::default()
            .with(SettingKey::AnnouncementBanner, json!({ "message": "Hi", "enabled": true }));

        assert!(watcher.diff(snapshot.clone()).is_empty());
        assert!(!watcher.is_tracking(SettingKey::AnnouncementBanner));

        // The startup read came back empty; the value polled earlier is
        // still news.
        watcher.record(SettingKey::AnnouncementBanner, None);
        assert_eq!(
            watcher.diff(snapshot.clone()),
            vec![ConfigEvent::Banner(BannerSetting {
                message: "Hi".to_string(),
                enabled: true,
            })]
        );
        assert!(watcher.diff(snapshot).is_empty());
    }

    #[test]
    fn test_applied_value_is_not_replayed() {
        let mut watcher = SettingsWatcher::new();
        let banner = json!({ "message": "Hi", "enabled": true });
        watcher.record(SettingKey::AnnouncementBanner, Some(banner.clone()));

        let snapshot = SettingsSnapshot::default().with(SettingKey::AnnouncementBanner, banner);
        assert!(watcher.diff(snapshot).is_empty());
    }

    #[test]
    fn test_changed_keys_only() {
        let mut watcher = SettingsWatcher::new();
        let base = SettingsSnapshot::default()
            .with(SettingKey::ThemeColors, json!({ "primaryColor": "#112233" }))
            .with(SettingKey::BackgroundImage, json!({ "url": "a.jpg" }));
        watcher.prime(&base);

        let next = base.with(SettingKey::ThemeColors, json!({ "primaryColor": "#445566" }));
        let events = watcher.diff(next);

        assert_eq!(events.len(), 1);
        match &events[0] {
            ConfigEvent::Theme(theme) => {
                assert_eq!(theme.primary_color.as_deref(), Some("#445566"))
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_removed_banner_disables() {
        let mut watcher = SettingsWatcher::new();
        watcher.prime(
            &SettingsSnapshot::default()
                .with(SettingKey::AnnouncementBanner, json!({ "message": "X", "enabled": true })),
        );

        let events = watcher.diff(SettingsSnapshot::default());
        assert_eq!(events, vec![ConfigEvent::Banner(BannerSetting::default())]);
    }

    #[test]
    fn test_removed_theme_is_silent() {
        let mut watcher = SettingsWatcher::new();
        watcher.prime(
            &SettingsSnapshot::default()
                .with(SettingKey::ThemeColors, json!({ "textColor": "#ffffff" })),
        );
        assert!(watcher.diff(SettingsSnapshot::default()).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_and_publish() {
        let store = MemorySettings::new();
        let bus = LiveConfigBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _guard = bus.subscribe(Channel::BackgroundChanged, move |event| {
            sink.borrow_mut().push(event.clone())
        });

        let mut watcher = SettingsWatcher::new();
        let first = SettingsSnapshot::fetch(&store).await;
        watcher.prime(&first);
        assert_eq!(watcher.publish_changes(first, &bus), 0);

        store.put(
            SettingKey::BackgroundImage.as_str(),
            json!({ "url": "https://cdn.example.com/bg.png" }),
        );
        let second = SettingsSnapshot::fetch(&store).await;
        assert_eq!(watcher.publish_changes(second, &bus), 1);

        let seen = seen.borrow();
        assert_eq!(
            seen.as_slice(),
            &[ConfigEvent::Background(BackgroundSetting {
                url: Some("https://cdn.example.com/bg.png".to_string()),
            })]
        );
    }
}
