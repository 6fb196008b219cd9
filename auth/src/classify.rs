//! Authentication classification and the privilege policy.
//!
//! DESIGN
//! ======
//! Classification is derived, never stored: it is recomputed from the current
//! identity and the policy every time the identity changes. The policy is a
//! trait so the rule can be swapped (allow-list, closure, remote roles)
//! without touching the state provider.

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

use std::collections::HashSet;

use crate::identity::SessionIdentity;

/// Built-in privileged account.
pub const DEFAULT_ADMIN_ID: &str = "b9522e4b-2a7a-4e7f-ad5c-068fb7b13165";

/// Three-valued authentication status driving route access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Classification {
    #[default]
    Anonymous,
    Authenticated,
    Privileged,
}

impl Classification {
    /// `true` for authenticated and privileged sessions.
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Privileged)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
            Self::Privileged => "privileged",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether an identity is granted privileged (admin) access.
pub trait PrivilegePolicy {
    fn is_privileged(&self, identity: &SessionIdentity) -> bool;
}

impl<F> PrivilegePolicy for F
where
    F: Fn(&SessionIdentity) -> bool,
{
    fn is_privileged(&self, identity: &SessionIdentity) -> bool {
        self(identity)
    }
}

/// Fixed set of identity strings granted privileged classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowList {
    ids: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { ids: ids.into_iter().map(Into::into).collect() }
    }

    /// Parse a comma-separated list. Entries are trimmed; empty entries are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty()),
        )
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new([DEFAULT_ADMIN_ID])
    }
}

impl PrivilegePolicy for AllowList {
    fn is_privileged(&self, identity: &SessionIdentity) -> bool {
        self.contains(&identity.id)
    }
}

/// Classify an optional identity under `policy`.
#[must_use]
pub fn classify(identity: Option<&SessionIdentity>, policy: &dyn PrivilegePolicy) -> Classification {
    match identity {
        Some(identity) if policy.is_privileged(identity) => Classification::Privileged,
        Some(_) => Classification::Authenticated,
        None => Classification::Anonymous,
    }
}
