//! # FitCoach - Training App Shell
//!
//! Routing, access control and live theming for the FitCoach app.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the shell
//! cargo run
//!
//! # Open a specific location in English
//! cargo run -- --language en run "#/forum"
//!
//! # Inspect the primary ramp for a color
//! cargo run -- shades "#22c55e"
//!
//! # See where a location lands for an unverified member
//! cargo run -- route /workout --unverified
//!
//! # Change the banner of a running shell
//! cargo run -- publish banner "Gym closed Friday"
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fitcoach_core::{
    AppConfig, BackgroundSetting, BannerSetting, JsonFileSettings, Language, SessionAuthState,
    SettingKey,
};
use fitcoach_router::{Navigator, RouteTable, View, decide};
use fitcoach_style::{ColorRamp, HexColor, StyleStore, ThemeConfig, apply_theme};
use fitcoach_ui::{Flags, run};

/// FitCoach - routing, access control and live theming for the training app
#[derive(Parser, Debug)]
#[command(name = "fitcoach")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// JSON settings file shared with running shells
    #[arg(short, long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Interface language (en or ar)
    #[arg(short, long, global = true)]
    language: Option<Language>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the shell (default)
    Run {
        /// Location to open, e.g. "#/forum"
        #[arg(default_value = "/")]
        route: String,
    },

    /// Print the primary color ramp for a base color
    Shades {
        /// Base color, e.g. "#22c55e"
        color: String,

        /// Print the style variables as a CSS block instead
        #[arg(long)]
        css: bool,
    },

    /// Resolve a location for a session profile
    Route {
        /// Location, e.g. "/workout" or "#/admin"
        path: String,

        /// Session still loading
        #[arg(long)]
        loading: bool,

        /// Signed out
        #[arg(long)]
        anonymous: bool,

        /// Email not verified
        #[arg(long)]
        unverified: bool,

        /// Signed in as a coach
        #[arg(long)]
        coach: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a live setting to the settings file
    Publish {
        #[command(subcommand)]
        setting: PublishCommand,
    },

    /// Print the effective configuration
    Config {
        /// Also write it to the default config path
        #[arg(long)]
        write: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PublishCommand {
    /// Theme colors; omitted fields are left out of the setting
    Theme {
        #[arg(long)]
        primary: Option<String>,
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        post_background: Option<String>,
        #[arg(long)]
        post_text: Option<String>,
        #[arg(long)]
        section_background: Option<String>,
        #[arg(long)]
        section_text: Option<String>,
    },

    /// Announcement banner
    Banner {
        message: String,

        /// Publish the banner switched off
        #[arg(long)]
        disabled: bool,
    },

    /// Background image; no URL clears it
    Background { url: Option<String> },
}

/// Outcome of `fitcoach route`.
#[derive(Debug, Serialize)]
struct RouteReport {
    requested: String,
    location: String,
    decision: fitcoach_router::AccessDecision,
    #[serde(flatten)]
    view: View,
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.verbose);
    tracing::info!("Starting FitCoach v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(language) = args.language {
        config.shell.language = language;
    }
    if let Some(path) = args.settings {
        config.settings.path = Some(path);
    }

    let command = args.command.unwrap_or(Command::Run {
        route: "/".to_string(),
    });

    match command {
        Command::Run { route } => {
            let settings_path = config.settings_path()?;
            tracing::info!(path = %settings_path.display(), "Watching settings");
            let flags = Flags {
                config,
                settings_path,
                initial_route: route,
            };
            run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;
        }

        Command::Shades { color, css } => print!("{}", shades(&color, css)?),

        Command::Route {
            path,
            loading,
            anonymous,
            unverified,
            coach,
            json,
        } => {
            let mut session = if anonymous {
                SessionAuthState::anonymous()
            } else {
                SessionAuthState::from_config(&config.session)
            };
            session.loading |= loading;
            if unverified {
                session.is_verified = false;
            }
            session.is_coach |= coach;

            let report = route_report(&path, &session)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", describe(&report, config.shell.language));
            }
        }

        Command::Publish { setting } => {
            let (key, value) = publish_value(setting)?;
            let store = JsonFileSettings::new(config.settings_path()?);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime
                .block_on(store.put(key.as_str(), value))
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("Published {key} to {}", store.path().display());
        }

        Command::Config { write } => {
            print!("{}", toml::to_string_pretty(&config)?);
            if write {
                let path = AppConfig::default_path()?;
                config.save_to(&path)?;
                println!("# written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn shades(color: &str, css: bool) -> anyhow::Result<String> {
    let base = HexColor::parse(color).with_context(|| format!("Invalid color {color:?}"))?;

    if css {
        let styles = StyleStore::new();
        apply_theme(
            &styles,
            &ThemeConfig {
                primary_color: Some(base.to_string()),
                ..Default::default()
            },
        );
        return Ok(format!("{}\n", styles.to_css()));
    }

    let ramp = ColorRamp::generate(&base.to_string());
    let mut out = String::new();
    for (step, hex) in ramp.iter() {
        out.push_str(&format!("{:>7}  {}\n", step.key(), hex));
    }
    Ok(out)
}

fn route_report(path: &str, session: &SessionAuthState) -> anyhow::Result<RouteReport> {
    let mut navigator = Navigator::new(RouteTable::standard(), "/");
    let view = navigator.navigate(path, session)?;
    Ok(RouteReport {
        requested: path.to_string(),
        location: navigator.location().to_string(),
        decision: decide(session),
        view,
    })
}

fn describe(report: &RouteReport, language: Language) -> String {
    let outcome = match &report.view {
        View::Loading => "loading indicator".to_string(),
        View::Verification => "verification gate".to_string(),
        View::Public { screen, .. } => format!("public: {}", screen.title(language)),
        View::Protected { screen, .. } => format!("protected: {}", screen.title(language)),
    };

    let mut line = format!("{} -> #{} ({outcome})", report.requested, report.location);
    if let Some(params) = report.view.params().filter(|p| !p.is_empty()) {
        let params: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        line.push_str(&format!(" [{}]", params.join(", ")));
    }
    line
}

fn publish_value(setting: PublishCommand) -> anyhow::Result<(SettingKey, serde_json::Value)> {
    match setting {
        PublishCommand::Theme {
            primary,
            background,
            text,
            post_background,
            post_text,
            section_background,
            section_text,
        } => {
            let theme = ThemeConfig {
                primary_color: primary,
                background_color: background,
                text_color: text,
                post_background_color: post_background,
                post_text_color: post_text,
                section_background_color: section_background,
                section_text_color: section_text,
            };
            if theme.is_empty() {
                bail!("No theme colors given");
            }
            for color in [
                &theme.primary_color,
                &theme.background_color,
                &theme.text_color,
                &theme.post_background_color,
                &theme.post_text_color,
                &theme.section_background_color,
                &theme.section_text_color,
            ]
            .into_iter()
            .flatten()
            {
                HexColor::parse(color).with_context(|| format!("Invalid color {color:?}"))?;
            }
            Ok((SettingKey::ThemeColors, serde_json::to_value(&theme)?))
        }

        PublishCommand::Banner { message, disabled } => {
            let banner = BannerSetting {
                message,
                enabled: !disabled,
            };
            Ok((SettingKey::AnnouncementBanner, serde_json::to_value(&banner)?))
        }

        PublishCommand::Background { url } => {
            let background = BackgroundSetting { url };
            Ok((SettingKey::BackgroundImage, serde_json::to_value(&background)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_router::Screen;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["fitcoach"]);
        assert!(args.command.is_none());
        assert!(args.language.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_global_flags() {
        let args = Args::parse_from(["fitcoach", "route", "/admin", "--coach", "-l", "en", "-vv"]);
        assert_eq!(args.language, Some(Language::En));
        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Command::Route { path, coach, .. }) => {
                assert_eq!(path, "/admin");
                assert!(coach);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_shades_output() {
        let out = shades("#112233", false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].ends_with("#112233"));
        assert!(lines.last().unwrap().ends_with("#000000"));

        let css = shades("#112233", true).unwrap();
        assert!(css.contains("--color-primary-500: #112233;"));
    }

    #[test]
    fn test_shades_rejects_bad_color() {
        assert!(shades("#12345", false).is_err());
        assert!(shades("zzzzzz", false).is_err());
    }

    #[test]
    fn test_route_report() {
        let session = SessionAuthState::from_config(&Default::default());
        let report = route_report("#/nutrition", &session).unwrap();
        assert_eq!(report.location, "/plan");
        assert_eq!(report.view.screen(), Some(Screen::PlanCreator));
        assert_eq!(
            describe(&report, Language::En),
            "#/nutrition -> #/plan (protected: Plan creator)"
        );
    }

    #[test]
    fn test_route_report_json() {
        let report = route_report("/reset-password/t0k", &SessionAuthState::anonymous()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["view"], "public");
        assert_eq!(json["screen"], "reset-password");
        assert_eq!(json["params"]["token"], "t0k");
        assert_eq!(json["decision"], "redirect-to-landing");
    }

    #[test]
    fn test_publish_values() {
        let (key, value) = publish_value(PublishCommand::Banner {
            message: "Hi".to_string(),
            disabled: false,
        })
        .unwrap();
        assert_eq!(key, SettingKey::AnnouncementBanner);
        assert_eq!(value, serde_json::json!({ "message": "Hi", "enabled": true }));

        let err = publish_value(PublishCommand::Theme {
            primary: Some("#nothex".to_string()),
            background: None,
            text: None,
            post_background: None,
            post_text: None,
            section_background: None,
            section_text: None,
        });
        assert!(err.is_err());
    }
}
