use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iced::keyboard::{self, key};
use iced::{Size, Subscription, Task};

use fitcoach_core::config::SessionConfig;
use fitcoach_core::{
    AppConfig, JsonFileSettings, SessionAuthState, SettingKey, SettingsSnapshot, SettingsStore,
    SettingsWatcher,
};
use fitcoach_router::{Navigator, RouteTable, View};

use crate::shell::Shell;

pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

/// Below this window width the shell uses the mobile chrome.
pub const COMPACT_WIDTH: f32 = 1024.0;

/// Startup parameters for the iced application.
#[derive(Debug, Clone)]
pub struct Flags {
    pub config: AppConfig,
    /// JSON settings file watched for live changes
    pub settings_path: PathBuf,
    /// Location opened first, e.g. `#/forum`
    pub initial_route: String,
}

pub struct App {
    pub shell: Shell,
    pub navigator: Navigator,
    pub session: SessionAuthState,
    pub profile: SessionConfig,
    pub store: Arc<dyn SettingsStore>,
    pub watcher: SettingsWatcher,
    pub current: View,
    pub route_error: Option<String>,
    pub window_size: Size,
    pub mobile_sidebar_open: bool,
    pub inbox_open: bool,
    pub edit_mode: bool,
    pub poll_every: Option<Duration>,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let store: Arc<dyn SettingsStore> = Arc::new(JsonFileSettings::new(&flags.settings_path));
        Self::with_store(flags, store)
    }

    /// Builds the app around any settings backend and issues the startup
    /// reads. Each read completes on its own; polling starts with the
    /// subscription and only watches keys whose startup read has landed.
    pub fn with_store(flags: Flags, store: Arc<dyn SettingsStore>) -> (Self, Task<Message>) {
        let Flags {
            config,
            initial_route,
            ..
        } = flags;

        let mut shell = Shell::new(config.shell.language);
        shell.mount();

        let session = SessionAuthState::from_config(&config.session);
        let poll_every = match config.shell.settings_poll_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let mut app = Self {
            shell,
            navigator: Navigator::new(RouteTable::standard(), &initial_route),
            session,
            profile: config.session,
            store,
            watcher: SettingsWatcher::new(),
            current: View::Loading,
            route_error: None,
            window_size: Size::new(config.shell.window_width, config.shell.window_height),
            mobile_sidebar_open: false,
            inbox_open: false,
            edit_mode: false,
            poll_every,
        };
        app.refresh_view();

        let startup = Task::batch(SettingKey::ALL.map(|key| app.read_setting(key)));

        (app, startup)
    }

    pub fn title(&self) -> String {
        let language = self.shell.language();
        match self.current.screen() {
            Some(screen) => format!("{} - FitCoach", screen.title(language)),
            None => "FitCoach".to_string(),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let history = keyboard::on_key_press(|pressed, modifiers| match pressed.as_ref() {
            keyboard::Key::Named(key::Named::ArrowLeft) if modifiers.alt() => Some(Message::Back),
            keyboard::Key::Named(key::Named::ArrowRight) if modifiers.alt() => {
                Some(Message::Forward)
            }
            _ => None,
        });

        let resize = iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        let poll = match self.poll_every {
            Some(every) => iced::time::every(every).map(|_| Message::PollSettings),
            None => Subscription::none(),
        };

        Subscription::batch([history, resize, poll])
    }

    /// Whether the mobile chrome (drawer sidebar, bottom nav) is in use.
    pub fn is_compact(&self) -> bool {
        self.window_size.width < COMPACT_WIDTH
    }

    fn read_setting(&self, key: SettingKey) -> Task<Message> {
        let read = self.store.get_setting(key.as_str());
        Task::perform(read, move |value| Message::SettingLoaded(key, value))
    }

    fn poll_settings(&self) -> Task<Message> {
        let store = Arc::clone(&self.store);
        Task::perform(
            async move { SettingsSnapshot::fetch(store.as_ref()).await },
            Message::SettingsPolled,
        )
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = Size::new(
        flags.config.shell.window_width,
        flags.config.shell.window_height,
    );

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(size)
        .theme(|_| iced::Theme::Dark)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
