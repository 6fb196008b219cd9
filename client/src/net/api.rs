//! Identity-service wiring for the browser build.
//!
//! The service location and the admin allow-list are baked in at compile time
//! from `STOREFRONT_AUTH_URL`, `STOREFRONT_AUTH_ANON_KEY` and
//! `STOREFRONT_ADMIN_IDS`.
//!
//! ERROR HANDLING
//! ==============
//! A build without service settings still renders: it gets a service that
//! reports nobody signed in and fails every sign-in attempt, so guards
//! redirect to the sign-in screen instead of crashing.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use auth::config::HostedConfig;
use auth::hosted::access_token_from_fragment;
use auth::signin::Portal;
use auth::{
    ACCESS_TOKEN_KEY, AllowList, HostedIdentityClient, IdentityService, KeyValueStore, OAuthOptions, OAuthOutcome,
    OAuthProvider, RemoteError, SessionIdentity, UserUpdate,
};

const NOT_CONFIGURED: &str = "identity service is not configured";

/// Service settings from compile-time values; `None` if either is blank.
pub fn hosted_config(base_url: Option<&str>, anon_key: Option<&str>) -> Option<HostedConfig> {
    let base_url = base_url.map(str::trim).filter(|v| !v.is_empty())?;
    let anon_key = anon_key.map(str::trim).filter(|v| !v.is_empty())?;
    Some(HostedConfig::new(base_url, anon_key))
}

/// Admin allow-list; the built-in admin when nothing was configured.
pub fn admin_policy(raw: Option<&str>) -> AllowList {
    raw.map_or_else(AllowList::default, AllowList::parse)
}

/// Where the provider sends the browser back to after consent.
pub fn oauth_return_url(origin: &str, portal: Portal) -> String {
    let path = match portal {
        Portal::Storefront => "/",
        Portal::Admin => "/admin",
    };
    format!("{}{path}", origin.trim_end_matches('/'))
}

/// Consent options for a sign-in screen served from `origin`.
pub fn oauth_options(origin: Option<&str>, portal: Portal) -> OAuthOptions {
    let options = OAuthOptions::offline_consent();
    match origin {
        Some(origin) => options.redirect_to(oauth_return_url(origin, portal)),
        None => options,
    }
}

/// Build the identity service, keeping its bearer token in `token_store`.
pub fn identity_service(token_store: impl KeyValueStore + 'static) -> Rc<dyn IdentityService> {
    let Some(config) = hosted_config(option_env!("STOREFRONT_AUTH_URL"), option_env!("STOREFRONT_AUTH_ANON_KEY"))
    else {
        #[cfg(feature = "csr")]
        log::warn!("{NOT_CONFIGURED}; sign-in is disabled");
        return Rc::new(Unconfigured);
    };
    match HostedIdentityClient::new(config) {
        Ok(client) => Rc::new(client.with_token_store(token_store)),
        Err(e) => {
            #[cfg(feature = "csr")]
            log::error!("identity client setup failed: {e}");
            #[cfg(not(feature = "csr"))]
            let _ = e;
            Rc::new(Unconfigured)
        }
    }
}

/// Store the bearer token the service left in the URL fragment after a
/// redirect. Returns whether one was adopted.
pub fn adopt_fragment_token(store: &dyn KeyValueStore, fragment: &str) -> bool {
    let Some(token) = access_token_from_fragment(fragment) else {
        return false;
    };
    match store.set(ACCESS_TOKEN_KEY, &token) {
        Ok(()) => true,
        Err(e) => {
            #[cfg(feature = "csr")]
            log::warn!("could not keep redirect session: {e}");
            #[cfg(not(feature = "csr"))]
            let _ = e;
            false
        }
    }
}

pub fn admin_ids() -> AllowList {
    admin_policy(option_env!("STOREFRONT_ADMIN_IDS"))
}

/// Stand-in service for builds without identity-service settings.
pub struct Unconfigured;

#[async_trait::async_trait(?Send)]
impl IdentityService for Unconfigured {
    async fn get_current_user(&self) -> Result<Option<SessionIdentity>, RemoteError> {
        Ok(None)
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<SessionIdentity, RemoteError> {
        Err(RemoteError::HttpClientBuild(NOT_CONFIGURED.to_owned()))
    }

    async fn sign_in_with_oauth(
        &self,
        _provider: OAuthProvider,
        _options: &OAuthOptions,
    ) -> Result<OAuthOutcome, RemoteError> {
        Err(RemoteError::HttpClientBuild(NOT_CONFIGURED.to_owned()))
    }

    async fn update_user(&self, _update: &UserUpdate) -> Result<(), RemoteError> {
        Err(RemoteError::HttpClientBuild(NOT_CONFIGURED.to_owned()))
    }
}
