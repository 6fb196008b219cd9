//! Application route table and the per-navigation access decision.
//!
//! ARCHITECTURE
//! ============
//! Screens carry their access requirement; [`route`] combines the loading
//! gate, the table lookup and the guard so every host makes the same call.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::{Access, GuardDecision, Navigation, guard};
use crate::provider::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Book,
    ResetPassword,
    SignIn,
    SignUp,
    AdminSignIn,
    Dashboard,
    Calendar,
    Profile,
    Settings,
    Tables,
    AdminDashboard,
    AdminOrders,
    AdminUsers,
    AdminSales,
}

impl Screen {
    pub const ALL: [Self; 14] = [
        Self::Book,
        Self::ResetPassword,
        Self::SignIn,
        Self::SignUp,
        Self::AdminSignIn,
        Self::Dashboard,
        Self::Calendar,
        Self::Profile,
        Self::Settings,
        Self::Tables,
        Self::AdminDashboard,
        Self::AdminOrders,
        Self::AdminUsers,
        Self::AdminSales,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Book => "/book",
            Self::ResetPassword => "/reset-password",
            Self::SignIn => "/auth/signin",
            Self::SignUp => "/auth/signup",
            Self::AdminSignIn => "/admin/auth/signin",
            Self::Dashboard => "/",
            Self::Calendar => "/calendar",
            Self::Profile => "/profile",
            Self::Settings => "/settings",
            Self::Tables => "/tables",
            Self::AdminDashboard => "/admin",
            Self::AdminOrders => "/admin/orders",
            Self::AdminUsers => "/admin/users",
            Self::AdminSales => "/admin/sales",
        }
    }

    /// Access requirement, or `None` for public screens.
    #[must_use]
    pub fn access(self) -> Option<Access> {
        match self {
            Self::Book | Self::ResetPassword | Self::SignIn | Self::SignUp | Self::AdminSignIn => None,
            Self::Dashboard | Self::Calendar | Self::Profile | Self::Settings | Self::Tables => Some(Access::General),
            Self::AdminDashboard | Self::AdminOrders | Self::AdminUsers | Self::AdminSales => Some(Access::Admin),
        }
    }

    /// Look up a screen by path. Query strings, fragments and a trailing
    /// slash are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|s| s.path() == normalized)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Session not resolved yet: show the loader.
    Loading,
    NotFound,
    Render(Screen),
    Redirect(Navigation),
}

/// Decide what to show for `path` under `state`.
#[must_use]
pub fn route(state: &AuthState, path: &str) -> RouteOutcome {
    if state.is_loading() {
        return RouteOutcome::Loading;
    }
    let Some(screen) = Screen::from_path(path) else {
        return RouteOutcome::NotFound;
    };
    let Some(access) = screen.access() else {
        return RouteOutcome::Render(screen);
    };
    match guard(state.allowed(access), Some(access.redirect()), screen) {
        GuardDecision::Render(screen) => RouteOutcome::Render(screen),
        GuardDecision::Redirect(nav) => RouteOutcome::Redirect(nav),
        GuardDecision::Withheld => RouteOutcome::Loading,
    }
}
