//! # FitCoach UI
//!
//! The application shell and its iced front end.
//!
//! ## Architecture
//!
//! - [`shell::Shell`]: renderer-independent shell state. Owns the style
//!   store, the live configuration bus and the banner/background state.
//! - [`app::App`]: Elm-style iced program wrapping a shell, a navigator and
//!   the session.
//!
//! ## Learning: The Elm Architecture
//!
//! Every interaction is a [`app::Message`]. `update` mutates state and may
//! return a `Task` (the startup settings reads, the periodic poll). `view`
//! is a pure function of state, so a live theme change shows up on the next
//! frame without widgets tracking it.

pub mod app;
pub mod shell;
pub mod state;
pub mod theme;

pub use app::{App, Flags, run};
pub use shell::Shell;
pub use state::{BackgroundState, BannerState, BannerVisibility, DocumentAttributes};
pub use theme::Palette;
