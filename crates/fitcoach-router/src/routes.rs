//! The static route table.
//!
//! ## Learning: Data Instead of Branches
//!
//! Role-specific routes are ordinary table rows carrying a [`Capability`].
//! The router evaluates every row the same way, so "does `/admin` exist
//! for this user?" is a lookup rather than a special case in the code that
//! builds the table.

use std::collections::BTreeMap;

use fitcoach_core::{Language, SessionAuthState};
use serde::Serialize;

/// Which layout hosts a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Reachable without signing in
    Public,
    /// Behind the access controller
    Protected,
}

/// What a user must be to see a route at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    #[default]
    Anyone,
    Coach,
}

impl Capability {
    pub fn allows(self, session: &SessionAuthState) -> bool {
        match self {
            Capability::Anyone => true,
            Capability::Coach => session.is_coach,
        }
    }
}

/// Screens provided by the feature modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Landing,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    ComprehensivePlan,
    PlanCreator,
    CalorieCalculator,
    SubscriptionConfirmation,
    MealAnalysis,
    RecipeGenerator,
    InstantRelief,
    NutritionGuide,
    Exercises,
    Profile,
    Subscription,
    AiCoach,
    Conversations,
    Sections,
    Forum,
    Challenges,
    ProgressTracker,
    PoseCorrector,
    LiveCoach,
    AdminPanel,
    UserList,
}

impl Screen {
    /// Screen title in the given language.
    pub fn title(self, language: Language) -> &'static str {
        let (en, ar) = match self {
            Screen::Landing => ("Welcome", "مرحبا"),
            Screen::Login => ("Sign in", "تسجيل الدخول"),
            Screen::Register => ("Create account", "إنشاء حساب"),
            Screen::ForgotPassword => ("Forgot password", "نسيت كلمة المرور"),
            Screen::ResetPassword => ("Reset password", "إعادة تعيين كلمة المرور"),
            Screen::Dashboard => ("Dashboard", "لوحة التحكم"),
            Screen::ComprehensivePlan => ("Comprehensive plan", "الخطة الشاملة"),
            Screen::PlanCreator => ("Plan creator", "إنشاء الخطة"),
            Screen::CalorieCalculator => ("Calorie calculator", "حاسبة السعرات"),
            Screen::SubscriptionConfirmation => ("Confirm subscription", "تأكيد الاشتراك"),
            Screen::MealAnalysis => ("Meal analysis", "تحليل الوجبات"),
            Screen::RecipeGenerator => ("Recipe generator", "مولد الوصفات"),
            Screen::InstantRelief => ("Instant relief", "راحة فورية"),
            Screen::NutritionGuide => ("Nutrition guide", "دليل التغذية"),
            Screen::Exercises => ("Exercises", "التمارين"),
            Screen::Profile => ("Profile", "الملف الشخصي"),
            Screen::Subscription => ("Subscription", "الاشتراك"),
            Screen::AiCoach => ("AI coach", "المدرب الذكي"),
            Screen::Conversations => ("Conversations", "المحادثات"),
            Screen::Sections => ("Sections", "الأقسام"),
            Screen::Forum => ("Forum", "المنتدى"),
            Screen::Challenges => ("Challenges", "التحديات"),
            Screen::ProgressTracker => ("Progress tracker", "متابعة التقدم"),
            Screen::PoseCorrector => ("Pose corrector", "مصحح الوضعية"),
            Screen::LiveCoach => ("Live coach", "المدرب المباشر"),
            Screen::AdminPanel => ("Admin panel", "لوحة الإدارة"),
            Screen::UserList => ("Users", "المستخدمون"),
        };
        language.pick(en, ar)
    }
}

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTarget {
    Screen(Screen),
    /// Replace the location with this path
    Redirect(&'static str),
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path pattern; `:name` segments capture a parameter
    pub pattern: &'static str,
    pub layout: Layout,
    pub target: RouteTarget,
    pub requires: Capability,
}

impl Route {
    pub const fn public(pattern: &'static str, screen: Screen) -> Self {
        Self {
            pattern,
            layout: Layout::Public,
            target: RouteTarget::Screen(screen),
            requires: Capability::Anyone,
        }
    }

    pub const fn protected(pattern: &'static str, screen: Screen) -> Self {
        Self {
            pattern,
            layout: Layout::Protected,
            target: RouteTarget::Screen(screen),
            requires: Capability::Anyone,
        }
    }

    pub const fn redirect(pattern: &'static str, to: &'static str) -> Self {
        Self {
            pattern,
            layout: Layout::Protected,
            target: RouteTarget::Redirect(to),
            requires: Capability::Anyone,
        }
    }

    pub const fn requires(mut self, capability: Capability) -> Self {
        self.requires = capability;
        self
    }

    pub fn has_params(&self) -> bool {
        self.pattern.contains(':')
    }

    /// Matches `path` against the pattern, returning captured parameters.
    ///
    /// Static segments compare case-insensitively; empty segments are
    /// ignored, so `/plan/` matches `/plan`.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut pattern = segments(self.pattern);
        let mut actual = segments(path);
        let mut params = BTreeMap::new();

        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return Some(params),
                (Some(expected), Some(segment)) => match expected.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), segment.to_string());
                    }
                    None if expected.eq_ignore_ascii_case(segment) => {}
                    None => return None,
                },
                _ => return None,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// A route selected for a path, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

/// Ordered list of routes; the first allowed match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's route table.
    pub fn standard() -> Self {
        use Screen::*;

        Self::new(vec![
            Route::public("/landing", Landing),
            Route::public("/login", Login),
            Route::public("/register", Register),
            Route::public("/forgot-password", ForgotPassword),
            Route::public("/reset-password/:token", ResetPassword),
            Route::protected("/", Dashboard),
            Route::protected("/comprehensive-plan", ComprehensivePlan),
            Route::protected("/plan", PlanCreator),
            Route::protected("/calculator", CalorieCalculator),
            Route::protected("/subscribe/confirm", SubscriptionConfirmation),
            Route::protected("/meal-analysis", MealAnalysis),
            Route::protected("/recipe-generator", RecipeGenerator),
            Route::protected("/instant-relief", InstantRelief),
            // Renamed features; old links must keep working.
            Route::redirect("/workout", "/plan"),
            Route::redirect("/nutrition", "/plan"),
            Route::protected("/nutrition-guide", NutritionGuide),
            Route::protected("/exercises", Exercises),
            Route::protected("/profile", Profile),
            Route::protected("/subscription", Subscription),
            Route::protected("/ai-coach", AiCoach),
            Route::protected("/conversations", Conversations),
            Route::protected("/sections", Sections),
            Route::protected("/forum", Forum),
            Route::protected("/challenges", Challenges),
            Route::protected("/progress-tracker", ProgressTracker),
            Route::protected("/pose-corrector/:exerciseName", PoseCorrector),
            Route::protected("/live-coach/:exerciseName", LiveCoach),
            Route::protected("/admin", AdminPanel).requires(Capability::Coach),
            Route::protected("/users", UserList).requires(Capability::Coach),
        ])
    }

    /// First route matching `path` that `session` is allowed to see.
    pub fn match_path(&self, path: &str, session: &SessionAuthState) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            if !route.requires.allows(session) {
                return None;
            }
            let params = route.matches(path)?;
            Some(RouteMatch { route, params })
        })
    }

    /// Protected screens without parameters, in table order, for menus.
    pub fn navigation<'a>(
        &'a self,
        session: &'a SessionAuthState,
    ) -> impl Iterator<Item = (Screen, &'static str)> + 'a {
        self.routes.iter().filter_map(move |route| match route.target {
            RouteTarget::Screen(screen)
                if route.layout == Layout::Protected
                    && !route.has_params()
                    && route.requires.allows(session) =>
            {
                Some((screen, route.pattern))
            }
            _ => None,
        })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_core::User;

    fn member() -> SessionAuthState {
        SessionAuthState::signed_in(
            User {
                name: "Omar".to_string(),
                email: "omar@example.com".to_string(),
                is_coach: false,
                is_new_user: false,
            },
            true,
        )
    }

    fn coach() -> SessionAuthState {
        let mut session = member();
        session.is_coach = true;
        session
    }

    #[test]
    fn test_static_match() {
        let table = RouteTable::standard();
        let m = table.match_path("/forum", &member()).unwrap();
        assert_eq!(m.route.target, RouteTarget::Screen(Screen::Forum));
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_index_match() {
        let table = RouteTable::standard();
        let m = table.match_path("/", &member()).unwrap();
        assert_eq!(m.route.target, RouteTarget::Screen(Screen::Dashboard));
    }

    #[test]
    fn test_param_capture() {
        let table = RouteTable::standard();
        let m = table.match_path("/pose-corrector/Squat", &member()).unwrap();
        assert_eq!(m.route.target, RouteTarget::Screen(Screen::PoseCorrector));
        assert_eq!(m.params.get("exerciseName").map(String::as_str), Some("Squat"));

        let m = table.match_path("/reset-password/abc123", &SessionAuthState::anonymous()).unwrap();
        assert_eq!(m.route.layout, Layout::Public);
        assert_eq!(m.params.get("token").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_param_route_needs_param() {
        let table = RouteTable::standard();
        assert!(table.match_path("/live-coach", &member()).is_none());
        assert!(table.match_path("/live-coach/a/b", &member()).is_none());
    }

    #[test]
    fn test_case_insensitive_static_segments() {
        let table = RouteTable::standard();
        let m = table.match_path("/Subscribe/CONFIRM", &member()).unwrap();
        assert_eq!(
            m.route.target,
            RouteTarget::Screen(Screen::SubscriptionConfirmation)
        );
    }

    #[test]
    fn test_coach_routes_hidden_from_members() {
        let table = RouteTable::standard();
        assert!(table.match_path("/admin", &member()).is_none());
        assert!(table.match_path("/users", &member()).is_none());

        let m = table.match_path("/admin", &coach()).unwrap();
        assert_eq!(m.route.target, RouteTarget::Screen(Screen::AdminPanel));
    }

    #[test]
    fn test_aliases_redirect_to_plan() {
        let table = RouteTable::standard();
        for alias in ["/workout", "/nutrition"] {
            let m = table.match_path(alias, &member()).unwrap();
            assert_eq!(m.route.target, RouteTarget::Redirect("/plan"));
        }
    }

    #[test]
    fn test_navigation_respects_capability() {
        let table = RouteTable::standard();
        let member = member();
        let coach = coach();

        let member_items: Vec<_> = table.navigation(&member).map(|(s, _)| s).collect();
        let coach_items: Vec<_> = table.navigation(&coach).map(|(s, _)| s).collect();

        assert!(member_items.contains(&Screen::Dashboard));
        assert!(!member_items.contains(&Screen::AdminPanel));
        assert!(!member_items.contains(&Screen::PoseCorrector));
        assert!(coach_items.contains(&Screen::AdminPanel));
        assert!(coach_items.contains(&Screen::UserList));
    }

    #[test]
    fn test_titles_are_bilingual() {
        assert_eq!(Screen::Forum.title(Language::En), "Forum");
        assert_eq!(Screen::Forum.title(Language::Ar), "المنتدى");
    }
}
