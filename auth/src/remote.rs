//! Remote identity service seam.
//!
//! The hosted service is an external collaborator; this module only names the
//! four capabilities the application consumes and the errors they produce.
//! Futures are `?Send` because the browser HTTP stack is single-threaded.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use crate::identity::SessionIdentity;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity-service calls.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connect, timeout, offline).
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid login credentials")]
    InvalidCredentials,

    /// The service rejected the request payload (weak password, no session).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The OAuth provider refused or is not enabled.
    #[error("oauth provider error: {0}")]
    Provider(String),

    #[error("identity service returned status {status}")]
    Response { status: u16, body: String },

    #[error("identity service response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl RemoteError {
    /// Sign-in failures are reported as either "network" or "other".
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// =============================================================================
// OAUTH
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    /// Provider name as the identity service expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "github" => Ok(Self::GitHub),
            other => Err(RemoteError::Provider(format!("unsupported provider: {other}"))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthOptions {
    /// Where the provider sends the browser after consent.
    pub redirect_to: Option<String>,
    /// Extra query parameters forwarded to the provider, in order.
    pub query_params: Vec<(String, String)>,
}

impl OAuthOptions {
    /// Request a refresh token and always show the consent screen.
    #[must_use]
    pub fn offline_consent() -> Self {
        Self {
            redirect_to: None,
            query_params: vec![
                ("access_type".to_owned(), "offline".to_owned()),
                ("prompt".to_owned(), "consent".to_owned()),
            ],
        }
    }

    #[must_use]
    pub fn redirect_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }
}

/// Result of starting an OAuth sign-in.
#[derive(Clone, Debug, PartialEq)]
pub enum OAuthOutcome {
    /// The service completed sign-in inline.
    Session(SessionIdentity),
    /// The browser must be sent to the provider's consent page.
    Redirect { url: String },
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UserUpdate {
    pub password: String,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The hosted identity service as consumed by this application.
#[async_trait::async_trait(?Send)]
pub trait IdentityService {
    /// Current session, or `None` when nobody is signed in.
    async fn get_current_user(&self) -> Result<Option<SessionIdentity>, RemoteError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SessionIdentity, RemoteError>;

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        options: &OAuthOptions,
    ) -> Result<OAuthOutcome, RemoteError>;

    async fn update_user(&self, update: &UserUpdate) -> Result<(), RemoteError>;

    /// End the remote session. Services without server-side sessions have
    /// nothing to do.
    async fn sign_out(&self) -> Result<(), RemoteError> {
        Ok(())
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
