//! Access control for protected routes.

use fitcoach_core::SessionAuthState;
use serde::Serialize;

/// What the protected layout does for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessDecision {
    /// Session is still being established; show a spinner
    Loading,
    /// Not signed in; replace the location with the landing page
    RedirectToLanding,
    /// Signed in but unverified; show the verification screen
    VerificationGate,
    /// Render the protected chrome and the route's screen
    Granted,
}

/// Evaluates the session. Checks run in order and the first one wins:
/// loading, then authentication, then verification. Coaches skip
/// verification.
pub fn decide(session: &SessionAuthState) -> AccessDecision {
    if session.loading {
        AccessDecision::Loading
    } else if !session.is_authenticated {
        AccessDecision::RedirectToLanding
    } else if !session.is_verified && !session.is_coach {
        AccessDecision::VerificationGate
    } else {
        AccessDecision::Granted
    }
}
