//! Session state as reported by the authentication store.
//!
//! The store itself lives outside the shell. The shell only reads this
//! snapshot, and re-reads it on every render.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// The signed-in user, as far as the shell cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_coach: bool,
    /// Shows the onboarding tour on first visit
    #[serde(default)]
    pub is_new_user: bool,
}

/// Authentication snapshot consumed by the route access controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAuthState {
    pub is_authenticated: bool,
    pub loading: bool,
    pub is_verified: bool,
    pub is_coach: bool,
    pub user: Option<User>,
}

impl SessionAuthState {
    /// No session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The auth store has not answered yet.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// A resolved session for `user`.
    pub fn signed_in(user: User, is_verified: bool) -> Self {
        Self {
            is_authenticated: true,
            loading: false,
            is_verified,
            is_coach: user.is_coach,
            user: Some(user),
        }
    }

    /// Builds the session described by the `[session]` config section.
    pub fn from_config(config: &SessionConfig) -> Self {
        if !config.authenticated {
            return Self::anonymous();
        }
        let user = User {
            name: config.name.clone(),
            email: config.email.clone(),
            is_coach: config.coach,
            is_new_user: config.new_user,
        };
        Self::signed_in(user, config.verified)
    }

    pub fn is_new_user(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_new_user)
    }

    /// Marks the onboarding tour as seen.
    pub fn finish_onboarding(&mut self) {
        if let Some(user) = self.user.as_mut() {
            user.is_new_user = false;
        }
    }
}
