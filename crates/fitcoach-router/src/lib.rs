//! # FitCoach Router
//!
//! Decides what the shell renders for a location.
//!
//! ## Resolution
//!
//! ```text
//!  "#/workout" ──► normalize ──► RouteTable::match_path ──┐
//!                                                          ▼
//!        public route? ── yes ──► View::Public
//!              │ no
//!              ▼
//!        access::decide(session)
//!          Loading ─────────────► View::Loading
//!          RedirectToLanding ───► replace("/landing"), resolve again
//!          VerificationGate ────► View::Verification
//!          Granted ─┬─ screen ──► View::Protected
//!                   └─ redirect ► replace(target), resolve again
//! ```
//!
//! Redirects always replace the current history entry, so the back button
//! never lands on an alias.

pub mod access;
pub mod history;
pub mod navigator;
pub mod routes;

pub use access::{AccessDecision, decide};
pub use history::{History, normalize};
pub use navigator::{MAX_REDIRECTS, Navigator, View};
pub use routes::{Capability, Layout, Route, RouteMatch, RouteTable, RouteTarget, Screen};

/// Path of the public landing page.
pub const LANDING_PATH: &str = "/landing";

/// Where unknown protected paths end up.
pub const ROOT_PATH: &str = "/";

/// Result type for navigation.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors that can occur while resolving a location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Redirect loop detected at {path} after {hops} hops")]
    RedirectLoop { path: String, hops: usize },
}
