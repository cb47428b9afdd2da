//! Route table and access guard
//!
//! The guard is a pure function of the session state at the moment of
//! navigation: anonymous visitors asking for a protected route are sent to
//! the login page and the protected view is never rendered.

use serde::Serialize;

use crate::session::{SessionState, SessionStore};

/// Every route the application knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
    Tasks,
    Calendar,
    Analytics,
    Team,
    Settings,
    Help,
    NotFound,
}

impl Route {
    /// Sidebar entries, in display order
    pub const SIDEBAR: [Route; 7] = [
        Route::Dashboard,
        Route::Tasks,
        Route::Calendar,
        Route::Analytics,
        Route::Team,
        Route::Settings,
        Route::Help,
    ];

    /// Resolve a location path. Unknown paths are `NotFound`.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/dashboard" => Route::Dashboard,
            "/login" => Route::Login,
            "/tasks" => Route::Tasks,
            "/calendar" => Route::Calendar,
            "/analytics" => Route::Analytics,
            "/team" => Route::Team,
            "/settings" => Route::Settings,
            "/help" => Route::Help,
            _ => Route::NotFound,
        }
    }

    /// Canonical path
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Tasks => "/tasks",
            Route::Calendar => "/calendar",
            Route::Analytics => "/analytics",
            Route::Team => "/team",
            Route::Settings => "/settings",
            Route::Help => "/help",
            Route::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Dashboard => "Dashboard",
            Route::Tasks => "Tasks",
            Route::Calendar => "Calendar",
            Route::Analytics => "Analytics",
            Route::Team => "Team",
            Route::Settings => "Settings",
            Route::Help => "Help",
            Route::NotFound => "Page Not Found",
        }
    }

    /// Requires an authenticated session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }
}

/// Access state as seen by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Authenticated,
    Anonymous,
}

impl From<&SessionState> for AccessState {
    fn from(state: &SessionState) -> Self {
        if state.is_authenticated() {
            AccessState::Authenticated
        } else {
            AccessState::Anonymous
        }
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Render(Route),
    Redirect(Route),
}

/// Decide what a navigation to `route` shows
pub fn admit(route: Route, access: AccessState) -> Admission {
    match (access, route.is_protected()) {
        (AccessState::Anonymous, true) => Admission::Redirect(Route::Login),
        _ => Admission::Render(route),
    }
}

/// Landing route after a successful login
pub const AFTER_LOGIN: Route = Route::Dashboard;

/// Landing route after logout
pub const AFTER_LOGOUT: Route = Route::Login;

/// Guard bound to a session store
#[derive(Debug, Clone, Copy)]
pub struct RouterGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> RouterGuard<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    /// Current access state, read synchronously
    pub fn access(&self) -> AccessState {
        if self.session.is_authenticated() {
            AccessState::Authenticated
        } else {
            AccessState::Anonymous
        }
    }

    pub fn admit(&self, route: Route) -> Admission {
        let admission = admit(route, self.access());
        if let Admission::Redirect(to) = admission {
            tracing::debug!(from = route.path(), to = to.path(), "Redirecting anonymous visitor");
        }
        admission
    }

    /// Resolve and admit a raw location path
    pub fn navigate(&self, path: &str) -> Admission {
        self.admit(Route::from_path(path))
    }
}
