//! Session identity as issued by the hosted identity service.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

/// The authenticated user record returned by the identity service.
///
/// Only `id` is interpreted by this crate. Every other field the service
/// sends is kept in `extra` so the persisted cache holds the full record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Service-issued unique identifier (UUID string).
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionIdentity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), email: None, name: None, extra: serde_json::Map::new() }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Human-readable name, falling back to `user_metadata.full_name` which is
    /// where OAuth providers put it.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| {
            self.extra
                .get("user_metadata")
                .and_then(|meta| meta.get("full_name"))
                .and_then(serde_json::Value::as_str)
        })
    }
}
