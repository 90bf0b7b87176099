//! Resolves the current location into what the shell should render.

use std::collections::BTreeMap;

use fitcoach_core::SessionAuthState;
use serde::Serialize;

use crate::access::{AccessDecision, decide};
use crate::history::History;
use crate::routes::{Layout, RouteTable, RouteTarget, Screen};
use crate::{LANDING_PATH, ROOT_PATH, RouteError, RouteResult};

/// Maximum number of redirects followed for one resolution.
pub const MAX_REDIRECTS: usize = 8;

/// Result of resolving a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    /// A public page, rendered without the protected chrome
    Public {
        screen: Screen,
        params: BTreeMap<String, String>,
    },
    /// Full-screen spinner while the session loads
    Loading,
    /// The verification screen, with no chrome
    Verification,
    /// A protected page inside the chrome
    Protected {
        screen: Screen,
        params: BTreeMap<String, String>,
    },
}

impl View {
    pub fn screen(&self) -> Option<Screen> {
        match self {
            View::Public { screen, .. } | View::Protected { screen, .. } => Some(*screen),
            View::Loading | View::Verification => None,
        }
    }

    pub fn params(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            View::Public { params, .. } | View::Protected { params, .. } => Some(params),
            View::Loading | View::Verification => None,
        }
    }

    /// Whether the protected chrome (sidebar, header, bottom nav) is shown.
    pub fn has_chrome(&self) -> bool {
        matches!(self, View::Protected { .. })
    }
}

/// Route table plus history.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    table: RouteTable,
    history: History,
}

impl Navigator {
    pub fn new(table: RouteTable, initial: &str) -> Self {
        Self {
            table,
            history: History::new(initial),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current normalized location.
    pub fn location(&self) -> &str {
        self.history.current()
    }

    /// Pushes `path` and resolves it.
    pub fn navigate(&mut self, path: &str, session: &SessionAuthState) -> RouteResult<View> {
        self.history.push(path);
        self.resolve(session)
    }

    /// Steps back and resolves. Stays put at the first entry.
    pub fn back(&mut self, session: &SessionAuthState) -> RouteResult<View> {
        self.history.back();
        self.resolve(session)
    }

    /// Steps forward and resolves. Stays put at the last entry.
    pub fn forward(&mut self, session: &SessionAuthState) -> RouteResult<View> {
        self.history.forward();
        self.resolve(session)
    }

    /// Resolves the current location, following redirects.
    ///
    /// Every redirect replaces the current history entry. Public routes are
    /// rendered without consulting the access controller.
    pub fn resolve(&mut self, session: &SessionAuthState) -> RouteResult<View> {
        for _ in 0..=MAX_REDIRECTS {
            let location = self.history.current().to_string();
            let matched = self
                .table
                .match_path(&location, session)
                .map(|m| (m.route.layout, m.route.target, m.params));

            if let Some((Layout::Public, target, params)) = &matched {
                match target {
                    RouteTarget::Screen(screen) => {
                        return Ok(View::Public {
                            screen: *screen,
                            params: params.clone(),
                        });
                    }
                    RouteTarget::Redirect(to) => {
                        self.redirect(&location, to);
                        continue;
                    }
                }
            }

            match decide(session) {
                AccessDecision::Loading => return Ok(View::Loading),
                AccessDecision::VerificationGate => return Ok(View::Verification),
                AccessDecision::RedirectToLanding => self.redirect(&location, LANDING_PATH),
                AccessDecision::Granted => match matched {
                    Some((_, RouteTarget::Screen(screen), params)) => {
                        return Ok(View::Protected { screen, params });
                    }
                    Some((_, RouteTarget::Redirect(to), _)) => self.redirect(&location, to),
                    None => self.redirect(&location, ROOT_PATH),
                },
            }
        }

        let path = self.history.current().to_string();
        tracing::warn!(%path, hops = MAX_REDIRECTS, "Redirect loop");
        Err(RouteError::RedirectLoop {
            path,
            hops: MAX_REDIRECTS,
        })
    }

    fn redirect(&mut self, from: &str, to: &str) {
        tracing::debug!(%from, %to, "Redirect");
        self.history.replace(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;
    use fitcoach_core::User;
    use proptest::prelude::*;

    fn member(verified: bool) -> SessionAuthState {
        SessionAuthState::signed_in(
            User {
                name: "Layla".to_string(),
                email: "layla@example.com".to_string(),
                is_coach: false,
                is_new_user: false,
            },
            verified,
        )
    }

    fn coach() -> SessionAuthState {
        let mut session = member(false);
        session.is_coach = true;
        session
    }

    fn navigator() -> Navigator {
        Navigator::new(RouteTable::standard(), "/")
    }

    #[test]
    fn test_alias_redirect_replaces_entry() {
        let session = member(true);
        let mut nav = navigator();

        let view = nav.navigate("#/workout", &session).unwrap();
        assert_eq!(view.screen(), Some(Screen::PlanCreator));
        assert_eq!(nav.location(), "/plan");

        let view = nav.back(&session).unwrap();
        assert_eq!(view.screen(), Some(Screen::Dashboard));
        assert_eq!(nav.location(), "/");
        assert_eq!(nav.history().len(), 2);
    }

    #[test]
    fn test_nutrition_alias() {
        let mut nav = navigator();
        nav.navigate("/nutrition", &member(true)).unwrap();
        assert_eq!(nav.location(), "/plan");
    }

    #[test]
    fn test_admin_for_member_goes_home() {
        let mut nav = navigator();
        let view = nav.navigate("/admin", &member(true)).unwrap();
        assert_eq!(view.screen(), Some(Screen::Dashboard));
        assert_eq!(nav.location(), "/");
    }

    #[test]
    fn test_admin_for_coach() {
        let mut nav = navigator();
        let view = nav.navigate("/users", &coach()).unwrap();
        assert_eq!(view.screen(), Some(Screen::UserList));
        assert!(view.has_chrome());
    }

    #[test]
    fn test_unknown_path_anonymous_goes_to_landing() {
        let mut nav = navigator();
        let view = nav.navigate("/no/such/page", &SessionAuthState::anonymous()).unwrap();
        assert_eq!(
            view,
            View::Public {
                screen: Screen::Landing,
                params: BTreeMap::new(),
            }
        );
        assert_eq!(nav.location(), LANDING_PATH);
    }

    #[test]
    fn test_unknown_path_member_goes_home() {
        let mut nav = navigator();
        let view = nav.navigate("/no/such/page", &member(true)).unwrap();
        assert_eq!(view.screen(), Some(Screen::Dashboard));
    }

    #[test]
    fn test_public_routes_skip_access_control() {
        let mut nav = navigator();
        let view = nav.navigate("/login", &SessionAuthState::loading()).unwrap();
        assert_eq!(view.screen(), Some(Screen::Login));
        assert!(!view.has_chrome());
    }

    #[test]
    fn test_loading_keeps_location() {
        let mut nav = navigator();
        let view = nav.navigate("/forum", &SessionAuthState::loading()).unwrap();
        assert_eq!(view, View::Loading);
        assert_eq!(nav.location(), "/forum");
    }

    #[test]
    fn test_verification_gate() {
        let mut nav = navigator();
        assert_eq!(nav.navigate("/forum", &member(false)).unwrap(), View::Verification);
        assert_eq!(nav.navigate("/forum", &coach()).unwrap().screen(), Some(Screen::Forum));
    }

    #[test]
    fn test_params_reach_the_view() {
        let mut nav = navigator();
        let view = nav.navigate("/live-coach/push-up", &member(true)).unwrap();
        assert_eq!(view.screen(), Some(Screen::LiveCoach));
        assert_eq!(
            view.params().and_then(|p| p.get("exerciseName")).map(String::as_str),
            Some("push-up")
        );
    }

    #[test]
    fn test_redirect_loop_is_an_error() {
        let table = RouteTable::new(vec![
            Route::redirect("/a", "/b"),
            Route::redirect("/b", "/a"),
        ]);
        let mut nav = Navigator::new(table, "/a");
        let err = nav.resolve(&member(true)).unwrap_err();
        assert!(matches!(err, RouteError::RedirectLoop { hops: MAX_REDIRECTS, .. }));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let table = RouteTable::new(vec![Route::protected("/only", Screen::Forum)]);
        let mut nav = Navigator::new(table, "/elsewhere");
        assert!(nav.resolve(&member(true)).is_err());
    }

    proptest! {
        #[test]
        fn protected_outcomes(loading: bool, authenticated: bool, verified: bool, is_coach: bool) {
            let session = SessionAuthState {
                is_authenticated: authenticated,
                loading,
                is_verified: verified,
                is_coach,
                user: None,
            };
            let mut nav = navigator();
            let view = nav.navigate("/profile", &session).unwrap();

            if loading {
                prop_assert_eq!(view, View::Loading);
            } else if !authenticated {
                prop_assert_eq!(view.screen(), Some(Screen::Landing));
                prop_assert_eq!(nav.location(), LANDING_PATH);
            } else if !verified && !is_coach {
                prop_assert_eq!(view, View::Verification);
            } else {
                prop_assert_eq!(view.screen(), Some(Screen::Profile));
                prop_assert!(view.has_chrome());
            }
        }

        #[test]
        fn resolve_never_loops_on_standard_table(path in "(/[a-z-]{0,12}){0,3}") {
            let mut nav = navigator();
            prop_assert!(nav.navigate(&path, &member(true)).is_ok());
        }
    }
}
