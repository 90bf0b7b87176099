use iced::Task;

use fitcoach_core::settings::{decode_background, decode_banner, decode_theme};
use fitcoach_core::{SessionAuthState, SettingKey};
use fitcoach_router::{RouteResult, View};

use super::{App, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(path) => {
                self.mobile_sidebar_open = false;
                let outcome = self.navigator.navigate(&path, &self.session);
                self.show(outcome);
            }

            Message::Back => {
                let outcome = self.navigator.back(&self.session);
                self.show(outcome);
            }

            Message::Forward => {
                let outcome = self.navigator.forward(&self.session);
                self.show(outcome);
            }

            Message::ToggleLanguage => {
                let next = self.shell.language().toggled();
                self.shell.set_language(next);
            }

            Message::DismissBanner => self.shell.dismiss_banner(),

            Message::ToggleMobileSidebar => {
                self.mobile_sidebar_open = !self.mobile_sidebar_open;
            }

            Message::CloseMobileSidebar => self.mobile_sidebar_open = false,

            Message::ToggleInbox => self.inbox_open = !self.inbox_open,

            Message::ToggleEditMode => {
                if self.session.is_coach {
                    self.edit_mode = !self.edit_mode;
                }
            }

            Message::FinishOnboarding => self.session.finish_onboarding(),

            Message::WindowResized(size) => {
                self.window_size = size;
                if !self.is_compact() {
                    self.mobile_sidebar_open = false;
                }
            }

            Message::SignIn => {
                let mut profile = self.profile.clone();
                profile.authenticated = true;
                self.session = SessionAuthState::from_config(&profile);
                tracing::info!(coach = self.session.is_coach, "Signed in");
                let outcome = self.navigator.navigate("/", &self.session);
                self.show(outcome);
            }

            Message::SignOut => {
                self.session = SessionAuthState::anonymous();
                self.edit_mode = false;
                self.mobile_sidebar_open = false;
                tracing::info!("Signed out");
                self.refresh_view();
            }

            Message::SettingLoaded(key, value) => {
                // Polls diff against exactly what was applied here.
                self.watcher.record(key, value.clone());
                match key {
                    SettingKey::ThemeColors => {
                        self.shell.apply_loaded_theme(value.and_then(decode_theme))
                    }
                    SettingKey::AnnouncementBanner => {
                        self.shell.apply_loaded_banner(value.and_then(decode_banner))
                    }
                    SettingKey::BackgroundImage => {
                        self.shell.apply_loaded_background(value.and_then(decode_background))
                    }
                }
            }

            Message::PollSettings => return self.poll_settings(),

            Message::SettingsPolled(snapshot) => {
                let published = self.watcher.publish_changes(snapshot, self.shell.bus());
                if published > 0 {
                    tracing::debug!(published, "Applied live settings");
                }
            }
        }

        Task::none()
    }

    /// Re-resolves the current location for the current session.
    pub fn refresh_view(&mut self) {
        let outcome = self.navigator.resolve(&self.session);
        self.show(outcome);
    }

    fn show(&mut self, outcome: RouteResult<View>) {
        match outcome {
            Ok(view) => {
                tracing::debug!(location = %self.navigator.location(), ?view, "Resolved");
                self.current = view;
                self.route_error = None;
            }
            Err(err) => {
                tracing::error!(%err, "Navigation failed");
                self.route_error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fitcoach_core::{AppConfig, Language, MemorySettings, SettingKey, SettingsSnapshot};
    use fitcoach_router::Screen;
    use serde_json::json;

    use super::*;
    use crate::app::Flags;

    fn app_with(config: AppConfig, route: &str) -> App {
        let flags = Flags {
            config,
            settings_path: "unused.json".into(),
            initial_route: route.to_string(),
        };
        let (app, _startup) = App::with_store(flags, Arc::new(MemorySettings::new()));
        app
    }

    fn app(route: &str) -> App {
        app_with(AppConfig::default(), route)
    }

    #[test]
    fn test_initial_route_resolves() {
        let app = app("#/forum");
        assert_eq!(app.current.screen(), Some(Screen::Forum));
        assert_eq!(app.title(), "المنتدى - FitCoach");
    }

    #[test]
    fn test_navigate_alias_and_back() {
        let mut app = app("/");
        let _ = app.update(Message::Navigate("/workout".to_string()));
        assert_eq!(app.navigator.location(), "/plan");

        let _ = app.update(Message::Back);
        assert_eq!(app.current.screen(), Some(Screen::Dashboard));
    }

    #[test]
    fn test_sign_out_lands_on_landing() {
        let mut app = app("/profile");
        let _ = app.update(Message::SignOut);
        assert_eq!(app.current.screen(), Some(Screen::Landing));
        assert!(!app.current.has_chrome());

        let _ = app.update(Message::SignIn);
        assert_eq!(app.current.screen(), Some(Screen::Dashboard));
    }

    #[test]
    fn test_unverified_member_sees_gate() {
        let mut config = AppConfig::default();
        config.session.verified = false;
        let app = app_with(config, "/forum");
        assert_eq!(app.current, View::Verification);
    }

    #[test]
    fn test_edit_mode_is_coach_only() {
        let mut app = app("/");
        let _ = app.update(Message::ToggleEditMode);
        assert!(!app.edit_mode);

        let mut config = AppConfig::default();
        config.session.coach = true;
        let mut app = app_with(config, "/");
        let _ = app.update(Message::ToggleEditMode);
        assert!(app.edit_mode);
    }

    #[test]
    fn test_language_toggle() {
        let mut app = app("/");
        assert_eq!(app.shell.language(), Language::Ar);
        let _ = app.update(Message::ToggleLanguage);
        assert_eq!(app.shell.language(), Language::En);
        assert_eq!(app.title(), "Dashboard - FitCoach");
    }

    #[test]
    fn test_navigation_closes_mobile_sidebar() {
        let mut app = app("/");
        let _ = app.update(Message::ToggleMobileSidebar);
        assert!(app.mobile_sidebar_open);
        let _ = app.update(Message::Navigate("/forum".to_string()));
        assert!(!app.mobile_sidebar_open);
    }

    fn loaded(app: &mut App, snapshot: &SettingsSnapshot) {
        for key in SettingKey::ALL {
            let _ = app.update(Message::SettingLoaded(key, snapshot.get(key).cloned()));
        }
    }

    #[test]
    fn test_polled_changes_reach_the_shell() {
        let mut app = app("/");
        loaded(&mut app, &SettingsSnapshot::default());
        let _ = app.update(Message::SettingsPolled(SettingsSnapshot::default()));

        let changed = SettingsSnapshot::default().with(
            SettingKey::AnnouncementBanner,
            json!({ "message": "Ramadan hours", "enabled": true }),
        );
        let _ = app.update(Message::SettingsPolled(changed));
        assert_eq!(app.shell.banner_message().as_deref(), Some("Ramadan hours"));

        let _ = app.update(Message::DismissBanner);
        assert_eq!(app.shell.banner_message(), None);
    }

    #[test]
    fn test_change_after_empty_startup_read_is_published() {
        let store = MemorySettings::new();
        let flags = Flags {
            config: AppConfig::default(),
            settings_path: "unused.json".into(),
            initial_route: "/".to_string(),
        };
        let (mut app, _startup) = App::with_store(flags, Arc::new(store.clone()));

        let _ = app.update(Message::SettingLoaded(SettingKey::AnnouncementBanner, None));
        store.put(
            SettingKey::AnnouncementBanner.as_str(),
            json!({ "message": "Gym closed", "enabled": true }),
        );

        let polled = SettingsSnapshot::default().with(
            SettingKey::AnnouncementBanner,
            json!({ "message": "Gym closed", "enabled": true }),
        );
        let _ = app.update(Message::SettingsPolled(polled.clone()));
        let _ = app.update(Message::SettingsPolled(polled));
        assert_eq!(app.shell.banner_message().as_deref(), Some("Gym closed"));
    }

    #[test]
    fn test_poll_before_startup_read_does_not_swallow_change() {
        let mut app = app("/");
        let polled = SettingsSnapshot::default()
            .with(SettingKey::BackgroundImage, json!({ "url": "gym.jpg" }));

        // The background read has not come back yet.
        let _ = app.update(Message::SettingsPolled(polled.clone()));
        assert_eq!(app.shell.background_url(), None);

        // It then returns the value from before the edit.
        let _ = app.update(Message::SettingLoaded(SettingKey::BackgroundImage, None));
        let _ = app.update(Message::SettingsPolled(polled));
        assert_eq!(app.shell.background_url().as_deref(), Some("gym.jpg"));
    }

    #[test]
    fn test_loaded_banner_is_not_replayed_after_dismissal() {
        let mut app = app("/");
        let banner = json!({ "message": "Welcome back", "enabled": true });
        let _ = app.update(Message::SettingLoaded(
            SettingKey::AnnouncementBanner,
            Some(banner.clone()),
        ));
        assert_eq!(app.shell.banner_message().as_deref(), Some("Welcome back"));

        let _ = app.update(Message::DismissBanner);
        let polled = SettingsSnapshot::default().with(SettingKey::AnnouncementBanner, banner);
        let _ = app.update(Message::SettingsPolled(polled));
        assert_eq!(app.shell.banner_message(), None);
    }

    #[test]
    fn test_loaded_theme_applies() {
        let mut app = app("/");
        let _ = app.update(Message::SettingLoaded(
            SettingKey::ThemeColors,
            Some(json!({ "primaryColor": "#112233" })),
        ));
        assert_eq!(
            app.shell.styles().get("--color-primary-500").as_deref(),
            Some("#112233")
        );
    }
}
