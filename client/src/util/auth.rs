//! Route guard component shared by every protected screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` only mounts routes once the session has resolved, so a `Protected`
//! never sees an unresolved flag in practice. If it does, it renders nothing
//! and does not navigate.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use auth::{Access, AuthState, GuardDecision, Navigation, guard};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;

/// Router options equivalent to a guard navigation.
pub fn navigate_options(nav: &Navigation) -> NavigateOptions {
    NavigateOptions { replace: nav.replace, ..NavigateOptions::default() }
}

/// The redirect a guard would issue for `state`, if any.
pub fn pending_redirect(state: &AuthState, access: Access, redirect: &str) -> Option<Navigation> {
    guard(state.allowed(access), Some(redirect), ())
        .navigation()
        .cloned()
}

/// Render `children` when the current user has `access`, otherwise replace
/// the history entry with `redirect` (defaults to the access level's sign-in
/// screen).
#[component]
pub fn Protected(
    access: Access,
    #[prop(optional)] redirect: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let redirect = redirect.unwrap_or(access.redirect());
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(nav) = auth.state.with(|state| pending_redirect(state, access, redirect)) {
            navigate(&nav.to, navigate_options(&nav));
        }
    });

    move || match guard(auth.allowed(access), Some(redirect), ()) {
        GuardDecision::Render(()) => children().into_any(),
        GuardDecision::Redirect(_) | GuardDecision::Withheld => ().into_any(),
    }
}
