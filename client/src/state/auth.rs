//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AuthContext`] is created by `App` and provided as context. Route
//! guards and user-aware components read `state`; sign-in screens and the
//! logout button mutate through the context methods so the provider and the
//! signal never disagree.
//!
//! The provider itself is not `Send` (it owns the HTTP client and the
//! policy behind `Rc`), so it lives in local arena storage and only its
//! `AuthState` snapshot is a signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use auth::signin::{OAuthStart, Portal, SignInError, SignedIn, complete_oauth, complete_sign_in};
use auth::{Access, AuthProvider, AuthState, Classification, IdentityService, OAuthOutcome, RemoteError, SessionIdentity};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Snapshot of the provider state; re-set after every mutation.
    pub state: RwSignal<AuthState>,
    provider: StoredValue<AuthProvider, LocalStorage>,
}

impl AuthContext {
    pub fn new(provider: AuthProvider) -> Self {
        let state = RwSignal::new(provider.state().clone());
        Self { state, provider: StoredValue::new_local(provider) }
    }

    /// Permission flag for `access`; `None` until the session has resolved.
    pub fn allowed(self, access: Access) -> Option<bool> {
        self.state.with(|s| s.allowed(access))
    }

    pub fn service(self) -> Option<Rc<dyn IdentityService>> {
        self.provider.try_with_value(AuthProvider::service)
    }

    /// Start the single session resolution.
    ///
    /// If the app is torn down before the identity service answers, the
    /// arena slot is gone, `try_update_value` yields `None` and the result is
    /// dropped.
    #[cfg(feature = "csr")]
    pub fn resolve(self) {
        let Some(ticket) = self.provider.try_update_value(AuthProvider::begin_resolution).flatten() else {
            return;
        };
        let Some(service) = self.service() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = service.get_current_user().await;
            if let Err(e) = &result {
                log::error!("Error checking authentication: {e}");
            }
            self.mutate(|provider| provider.complete_resolution(ticket, result));
        });
    }

    pub fn login(self, identity: SessionIdentity) -> Option<Classification> {
        self.mutate(|provider| provider.login(identity))
    }

    /// Clear the local session now and end the remote one in the background.
    pub fn logout(self) {
        #[cfg(feature = "csr")]
        if let Some(service) = self.service() {
            leptos::task::spawn_local(async move {
                if let Err(e) = service.sign_out().await {
                    log::warn!("remote sign-out failed: {e}");
                }
            });
        }
        self.mutate(AuthProvider::logout);
    }

    /// Apply an awaited password sign-in result.
    ///
    /// # Errors
    ///
    /// Returns the sign-in failure to show on the screen.
    pub fn apply_sign_in(self, portal: Portal, result: Result<SessionIdentity, RemoteError>) -> Result<SignedIn, SignInError> {
        self.mutate(|provider| complete_sign_in(provider, portal, result))
            .unwrap_or_else(|| Err(disposed()))
    }

    /// Apply an awaited OAuth start result.
    ///
    /// # Errors
    ///
    /// Returns the sign-in failure to show on the screen.
    pub fn apply_oauth(self, portal: Portal, result: Result<OAuthOutcome, RemoteError>) -> Result<OAuthStart, SignInError> {
        self.mutate(|provider| complete_oauth(provider, portal, result))
            .unwrap_or_else(|| Err(disposed()))
    }

    fn mutate<U>(self, f: impl FnOnce(&mut AuthProvider) -> U) -> Option<U> {
        let (out, snapshot) = self.provider.try_update_value(|provider| {
            let out = f(provider);
            (out, provider.state().clone())
        })?;
        self.state.try_set(snapshot);
        Some(out)
    }
}

fn disposed() -> SignInError {
    SignInError::Remote(RemoteError::Network("application is shutting down".to_owned()))
}

/// Fetch the auth context provided by `App`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Short label for headers and status lines.
pub fn status_label(state: &AuthState) -> String {
    if state.is_loading() {
        return "Checking session...".to_owned();
    }
    match &state.user {
        Some(user) => {
            let who = user
                .display_name()
                .or(user.email.as_deref())
                .unwrap_or(user.id.as_str());
            if state.is_admin() { format!("{who} (admin)") } else { who.to_owned() }
        }
        None => "Not signed in".to_owned(),
    }
}
