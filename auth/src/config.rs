//! Identity-service configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::classify::AllowList;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Where the hosted identity service lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedConfig {
    /// Project base URL without a trailing slash.
    pub base_url: String,
    /// Public (anon) API key sent as the `apikey` header.
    pub anon_key: String,
    pub timeouts: Timeouts,
}

impl HostedConfig {
    #[must_use]
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.into(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `STOREFRONT_AUTH_URL`
    /// - `STOREFRONT_AUTH_ANON_KEY`
    ///
    /// Optional:
    /// - `STOREFRONT_AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STOREFRONT_AUTH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a timeout is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = required_env("STOREFRONT_AUTH_URL")?;
        let anon_key = required_env("STOREFRONT_AUTH_ANON_KEY")?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("STOREFRONT_AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("STOREFRONT_AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { timeouts, ..Self::new(&base_url, anon_key) })
    }
}

/// Full auth configuration: service location plus the privileged allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub hosted: HostedConfig,
    pub admin_ids: AllowList,
}

impl AuthConfig {
    /// [`HostedConfig::from_env`] plus `STOREFRONT_ADMIN_IDS` (comma list,
    /// defaults to the built-in admin).
    ///
    /// # Errors
    ///
    /// Propagates [`HostedConfig::from_env`] errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let hosted = HostedConfig::from_env()?;
        let admin_ids = std::env::var("STOREFRONT_ADMIN_IDS")
            .ok()
            .map_or_else(AllowList::default, |raw| AllowList::parse(&raw));
        Ok(Self { hosted, admin_ids })
    }
}

fn required_env(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(ConfigError::Missing { var }),
    }
}

fn env_parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}
