//! Route guard: render the protected content or redirect.
//!
//! The guard is pure. It is re-evaluated on every render of its parent and
//! keeps no state between calls.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

/// Where general screens send anonymous visitors.
pub const DEFAULT_REDIRECT: &str = "/auth/signin";
/// Where admin screens send non-privileged visitors.
pub const ADMIN_REDIRECT: &str = "/admin/auth/signin";

/// Which permission flag a screen is gated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    /// Any signed-in user (`user` flag).
    General,
    /// Privileged users only (`isAdmin` flag).
    Admin,
}

impl Access {
    #[must_use]
    pub fn redirect(self) -> &'static str {
        match self {
            Self::General => DEFAULT_REDIRECT,
            Self::Admin => ADMIN_REDIRECT,
        }
    }
}

/// A client-side navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
    /// Replace the current history entry instead of pushing one.
    pub replace: bool,
}

impl Navigation {
    #[must_use]
    pub fn replace(to: impl Into<String>) -> Self {
        Self { to: to.into(), replace: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision<T> {
    Render(T),
    Redirect(Navigation),
    /// The permission flag was not resolved yet. Nothing is rendered and no
    /// navigation happens.
    Withheld,
}

impl<T> GuardDecision<T> {
    #[must_use]
    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            Self::Redirect(nav) => Some(nav),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GuardDecision<U> {
        match self {
            Self::Render(content) => GuardDecision::Render(f(content)),
            Self::Redirect(nav) => GuardDecision::Redirect(nav),
            Self::Withheld => GuardDecision::Withheld,
        }
    }
}

/// Gate `content` on `is_allowed`.
///
/// `None` means the caller reached the guard before the session resolved;
/// hosts are expected to show their loader instead. It is never treated as
/// "not allowed".
pub fn guard<T>(is_allowed: Option<bool>, redirect: Option<&str>, content: T) -> GuardDecision<T> {
    match is_allowed {
        Some(true) => GuardDecision::Render(content),
        Some(false) => GuardDecision::Redirect(Navigation::replace(redirect.unwrap_or(DEFAULT_REDIRECT))),
        None => {
            tracing::debug!("guard evaluated before session resolved; withholding");
            GuardDecision::Withheld
        }
    }
}
