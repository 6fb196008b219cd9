//! Hosted identity-service client over its REST auth API.
//!
//! DESIGN
//! ======
//! Thin `reqwest` wrapper around four endpoints under `/auth/v1`. URL building
//! and response parsing are pure functions so they are tested without a
//! network. The bearer token of the signed-in session is held in memory and,
//! when a token store is attached, written through so the next run resumes it.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to [`RemoteError::Network`]; everything that got an
//! HTTP response maps to a status-specific variant. Callers decide how much
//! of that distinction to show.

#[cfg(test)]
#[path = "hosted_test.rs"]
mod hosted_test;

use std::cell::RefCell;

use serde::Deserialize;

use crate::config::HostedConfig;
use crate::identity::SessionIdentity;
use crate::remote::{IdentityService, OAuthOptions, OAuthOutcome, OAuthProvider, RemoteError, UserUpdate};
use crate::store::{ACCESS_TOKEN_KEY, KeyValueStore};

const AUTH_PATH: &str = "/auth/v1";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HostedIdentityClient {
    http: reqwest::Client,
    config: HostedConfig,
    access_token: RefCell<Option<String>>,
    token_store: Option<Box<dyn KeyValueStore>>,
}

impl HostedIdentityClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: HostedConfig) -> Result<Self, RemoteError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(std::time::Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(std::time::Duration::from_secs(config.timeouts.connect_secs));
        let http = builder
            .build()
            .map_err(|e| RemoteError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, access_token: RefCell::new(None), token_store: None })
    }

    /// Resume a previously persisted session token.
    #[must_use]
    pub fn with_access_token(self, token: Option<String>) -> Self {
        self.set_access_token(token);
        self
    }

    /// Keep the bearer token in `store` and resume the one already there.
    #[must_use]
    pub fn with_token_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        match store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => *self.access_token.get_mut() = token.filter(|t| !t.is_empty()),
            Err(e) => tracing::warn!(error = %e, "access token read failed"),
        }
        self.token_store = Some(Box::new(store));
        self
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.access_token.borrow().clone()
    }

    pub fn set_access_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        if let Some(store) = &self.token_store {
            let result = match &token {
                Some(t) => store.set(ACCESS_TOKEN_KEY, t),
                None => store.remove(ACCESS_TOKEN_KEY),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "access token write failed");
            }
        }
        *self.access_token.borrow_mut() = token;
    }

    #[must_use]
    pub fn config(&self) -> &HostedConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        Ok((status, body))
    }

    /// Map a `GET /user` response. A rejected token is dropped so later
    /// calls (and later runs) start signed out.
    pub(crate) fn apply_current_user(
        &self,
        status: u16,
        body: String,
    ) -> Result<Option<SessionIdentity>, RemoteError> {
        let result = current_user_result(status, body);
        if token_rejected(status) {
            tracing::debug!(status, "session token rejected");
            self.set_access_token(None);
        }
        result
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityService for HostedIdentityClient {
    async fn get_current_user(&self) -> Result<Option<SessionIdentity>, RemoteError> {
        let Some(token) = self.access_token() else {
            return Ok(None);
        };
        let request = self
            .request(reqwest::Method::GET, &user_endpoint(&self.config.base_url))
            .bearer_auth(token);
        let (status, body) = self.send(request).await?;
        self.apply_current_user(status, body)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<SessionIdentity, RemoteError> {
        let request = self
            .request(reqwest::Method::POST, &password_token_endpoint(&self.config.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let (status, body) = self.send(request).await?;
        if !(200..=299).contains(&status) {
            return Err(sign_in_error(status, body));
        }
        let session = parse_token_response(&body)?;
        self.set_access_token(Some(session.access_token));
        Ok(session.user)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        options: &OAuthOptions,
    ) -> Result<OAuthOutcome, RemoteError> {
        let url = authorize_url(&self.config.base_url, provider, options);
        tracing::debug!(provider = provider.as_str(), "oauth redirect prepared");
        Ok(OAuthOutcome::Redirect { url })
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<(), RemoteError> {
        let Some(token) = self.access_token() else {
            return Err(RemoteError::Validation("no active session".to_owned()));
        };
        let request = self
            .request(reqwest::Method::PUT, &user_endpoint(&self.config.base_url))
            .bearer_auth(token)
            .json(update);
        let (status, body) = self.send(request).await?;
        update_result(status, body)
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        let Some(token) = self.access_token() else {
            return Ok(());
        };
        self.set_access_token(None);
        let request = self
            .request(reqwest::Method::POST, &logout_endpoint(&self.config.base_url))
            .bearer_auth(token);
        let (status, body) = self.send(request).await?;
        sign_out_result(status, body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct TokenSession {
    pub access_token: String,
    pub user: SessionIdentity,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

pub(crate) fn user_endpoint(base_url: &str) -> String {
    format!("{base_url}{AUTH_PATH}/user")
}

pub(crate) fn logout_endpoint(base_url: &str) -> String {
    format!("{base_url}{AUTH_PATH}/logout")
}

pub(crate) fn password_token_endpoint(base_url: &str) -> String {
    format!("{base_url}{AUTH_PATH}/token?grant_type=password")
}

/// Consent-page URL for `provider`. `redirect_to` comes first, then the
/// extra query parameters in their given order.
#[must_use]
pub fn authorize_url(base_url: &str, provider: OAuthProvider, options: &OAuthOptions) -> String {
    let mut url = format!("{base_url}{AUTH_PATH}/authorize?provider={}", provider.as_str());
    if let Some(redirect_to) = &options.redirect_to {
        url.push_str("&redirect_to=");
        url.push_str(&urlencoding::encode(redirect_to));
    }
    for (key, value) in &options.query_params {
        url.push('&');
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

pub(crate) fn parse_user(body: &str) -> Result<SessionIdentity, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))
}

pub(crate) fn parse_token_response(body: &str) -> Result<TokenSession, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Parse(e.to_string()))
}

/// Best human-readable message from an error body, else the raw body.
pub(crate) fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| body.to_owned())
}

fn token_rejected(status: u16) -> bool {
    matches!(status, 401 | 403)
}

pub(crate) fn current_user_result(status: u16, body: String) -> Result<Option<SessionIdentity>, RemoteError> {
    match status {
        200..=299 => parse_user(&body).map(Some),
        _ if token_rejected(status) => Ok(None),
        _ => Err(RemoteError::Response { status, body }),
    }
}

pub(crate) fn update_result(status: u16, body: String) -> Result<(), RemoteError> {
    match status {
        200..=299 => Ok(()),
        422 => Err(RemoteError::Validation(error_message(&body))),
        _ => Err(RemoteError::Response { status, body }),
    }
}

/// The token is already dropped locally; a session the service no longer
/// knows counts as signed out.
pub(crate) fn sign_out_result(status: u16, body: String) -> Result<(), RemoteError> {
    match status {
        200..=299 | 401 | 403 | 404 => Ok(()),
        _ => Err(RemoteError::Response { status, body }),
    }
}

pub(crate) fn sign_in_error(status: u16, body: String) -> RemoteError {
    match status {
        400 | 401 => RemoteError::InvalidCredentials,
        422 => RemoteError::Validation(error_message(&body)),
        _ => RemoteError::Response { status, body },
    }
}

/// Bearer token from the URL fragment the service redirects back with after
/// an OAuth consent or a recovery link (`#access_token=...&type=recovery`).
#[must_use]
pub fn access_token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(std::borrow::Cow::into_owned)
        .filter(|token| !token.is_empty())
}
