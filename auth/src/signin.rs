//! Sign-in flows: form validation, password and OAuth sign-in, and the
//! user-facing failure messages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The sign-in screens validate locally, call the identity service, then hand
//! the new identity to [`AuthProvider::login`]. Failures are recovered here and
//! turned into a transient message; they never propagate past the screen.
//!
//! Each flow comes in two forms: an `async fn` that borrows the provider for
//! the whole round trip (CLI, tests) and a `complete_*` function that applies
//! an already-awaited service result (reactive hosts that cannot hold a
//! borrow across an await).

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::classify::Classification;
use crate::identity::SessionIdentity;
use crate::provider::AuthProvider;
use crate::remote::{OAuthOptions, OAuthOutcome, OAuthProvider, RemoteError};
use crate::routes::Screen;

/// How long a sign-in failure message stays on screen.
pub const AUTH_MESSAGE_DISMISS: Duration = Duration::from_secs(3);

pub const MIN_PASSWORD_LEN: usize = 6;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const PASSWORD_NEEDS_LETTER: &str = "Password must contain at least one character";

pub const NETWORK_FAILURE_MESSAGE: &str = "A network error occurred. Please check your internet connection.";
pub const CREDENTIALS_FAILURE_MESSAGE: &str = "Email or password does not match records.";

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

/// Per-field validation messages. Empty when the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$").expect("email pattern is a valid regex")
    })
}

/// # Errors
///
/// Returns the message to show under the email field.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err(EMAIL_REQUIRED);
    }
    if !email_pattern().is_match(email) {
        return Err(EMAIL_INVALID);
    }
    Ok(())
}

/// # Errors
///
/// Returns the message to show under the password field.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(PASSWORD_NEEDS_LETTER);
    }
    Ok(())
}

/// Validate both fields, reporting every problem at once.
///
/// # Errors
///
/// Returns the collected field errors if any field is invalid.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), FieldErrors> {
    let errors = FieldErrors { email: validate_email(email).err(), password: validate_password(password).err() };
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Message shown when a field loses focus empty.
#[must_use]
pub fn blur_error(field: Field, value: &str) -> Option<&'static str> {
    if !value.is_empty() {
        return None;
    }
    Some(match field {
        Field::Email => EMAIL_REQUIRED,
        Field::Password => PASSWORD_REQUIRED,
    })
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("sign-in form is invalid")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SignInError {
    /// Transient message for the screen. Form errors are shown inline
    /// instead, so they have none.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Invalid(_) => None,
            Self::Remote(e) => Some(remote_failure_message(e)),
        }
    }
}

/// Sign-in failures are reported as "network" or "other"; every non-network
/// failure shares the credentials message.
#[must_use]
pub fn remote_failure_message(error: &RemoteError) -> &'static str {
    if error.is_network() { NETWORK_FAILURE_MESSAGE } else { CREDENTIALS_FAILURE_MESSAGE }
}

// =============================================================================
// FLOWS
// =============================================================================

/// Which sign-in screen the user came through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Portal {
    Storefront,
    Admin,
}

impl Portal {
    /// Where to go after signing in with `classification`.
    #[must_use]
    pub fn destination(self, classification: Classification) -> &'static str {
        match self {
            Self::Admin if classification.is_privileged() => Screen::AdminDashboard.path(),
            _ => Screen::Dashboard.path(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
    pub classification: Classification,
    pub destination: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OAuthStart {
    SignedIn(SignedIn),
    /// Send the browser here to continue with the provider.
    Redirect(String),
}

/// Validate, call the identity service, and log the user in.
///
/// # Errors
///
/// Returns [`SignInError::Invalid`] without any remote call when the form is
/// invalid, or [`SignInError::Remote`] when the service rejects the attempt.
pub async fn sign_in_with_password(
    provider: &mut AuthProvider,
    portal: Portal,
    email: &str,
    password: &str,
) -> Result<SignedIn, SignInError> {
    let email = email.trim();
    validate_credentials(email, password).map_err(SignInError::Invalid)?;
    let service = provider.service();
    let result = service.sign_in_with_password(email, password).await;
    complete_sign_in(provider, portal, result)
}

/// Apply a password sign-in result to the provider.
///
/// # Errors
///
/// Returns [`SignInError::Remote`] if `result` is an error.
pub fn complete_sign_in(
    provider: &mut AuthProvider,
    portal: Portal,
    result: Result<SessionIdentity, RemoteError>,
) -> Result<SignedIn, SignInError> {
    let identity = result.inspect_err(|e| {
        if e.is_network() {
            tracing::error!(error = %e, "network error during sign-in");
        } else {
            tracing::error!(error = %e, "login error");
        }
    })?;
    let id = identity.id.clone();
    let classification = provider.login(identity);
    tracing::info!(user_id = %id, %classification, "logged in user");
    Ok(SignedIn { classification, destination: portal.destination(classification) })
}

/// Start an OAuth sign-in with the consent options the sign-in screen uses.
///
/// # Errors
///
/// Returns [`SignInError::Remote`] when the provider or service fails.
pub async fn sign_in_with_oauth(
    provider: &mut AuthProvider,
    portal: Portal,
    oauth_provider: OAuthProvider,
    options: &OAuthOptions,
) -> Result<OAuthStart, SignInError> {
    let service = provider.service();
    let result = service.sign_in_with_oauth(oauth_provider, options).await;
    complete_oauth(provider, portal, result)
}

/// Apply an OAuth start result to the provider.
///
/// # Errors
///
/// Returns [`SignInError::Remote`] if `result` is an error.
pub fn complete_oauth(
    provider: &mut AuthProvider,
    portal: Portal,
    result: Result<OAuthOutcome, RemoteError>,
) -> Result<OAuthStart, SignInError> {
    match result {
        Ok(OAuthOutcome::Session(identity)) => {
            if identity.display_name().is_none() {
                tracing::warn!(user_id = %identity.id, "user name not available");
            }
            complete_sign_in(provider, portal, Ok(identity)).map(OAuthStart::SignedIn)
        }
        Ok(OAuthOutcome::Redirect { url }) => Ok(OAuthStart::Redirect(url)),
        Err(e) => {
            tracing::error!(error = %e, "error signing in with oauth provider");
            Err(SignInError::Remote(e))
        }
    }
}
