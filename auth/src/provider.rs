//! Authentication state provider: the single source of truth for who is
//! using the application right now.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts create one provider at startup (`init`) and keep it for the process
//! lifetime. The provider seeds an optimistic state from the persisted cache,
//! resolves the real session against the identity service exactly once, and
//! afterwards changes only through `login` / `logout`.
//!
//! LIFECYCLE
//! =========
//! `Loading` until the first resolution settles, then `Loaded` forever. While
//! loading, [`AuthState::allowed`] answers `None` so no authorization decision
//! can be taken from the optimistic classification.
//!
//! Reactive hosts that must not hold a borrow across the remote round trip use
//! the split form: [`AuthProvider::begin_resolution`] hands out a ticket, the
//! host awaits the service itself, then [`AuthProvider::complete_resolution`].
//! A host torn down in between just drops the ticket and the result.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::rc::Rc;

use crate::classify::{Classification, PrivilegePolicy, classify};
use crate::guard::Access;
use crate::identity::SessionIdentity;
use crate::remote::{IdentityService, RemoteError};
use crate::store::SessionCache;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
}

/// Snapshot of the current authentication state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub status: LoadStatus,
    pub user: Option<SessionIdentity>,
    pub classification: Classification,
}

impl AuthState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.classification.is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.classification.is_privileged()
    }

    /// Permission flag for `access`, or `None` while the session is unresolved.
    #[must_use]
    pub fn allowed(&self, access: Access) -> Option<bool> {
        if self.is_loading() {
            return None;
        }
        Some(match access {
            Access::General => self.is_logged_in(),
            Access::Admin => self.is_admin(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolution {
    NotStarted,
    InFlight,
    Settled,
}

/// Proof that a resolution was started. Records the mutation epoch so a result
/// that lost a race with `login`/`logout` is not applied over it.
#[must_use = "a resolution ticket must be passed to complete_resolution"]
#[derive(Debug)]
pub struct ResolutionTicket {
    epoch: u64,
}

pub struct AuthProvider {
    service: Rc<dyn IdentityService>,
    policy: Rc<dyn PrivilegePolicy>,
    cache: SessionCache,
    state: AuthState,
    resolution: Resolution,
    epoch: u64,
}

impl AuthProvider {
    /// Create the provider and seed it from the persisted cache.
    pub fn init(service: Rc<dyn IdentityService>, policy: Rc<dyn PrivilegePolicy>, cache: SessionCache) -> Self {
        let user = cache.load();
        let classification = classify(user.as_ref(), policy.as_ref());
        tracing::debug!(%classification, cached = user.is_some(), "auth provider initialized");
        Self {
            service,
            policy,
            cache,
            state: AuthState { status: LoadStatus::Loading, user, classification },
            resolution: Resolution::NotStarted,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Classification computed from the cached identity, for the first paint.
    /// Only meaningful while loading; afterwards it equals the resolved value.
    #[must_use]
    pub fn optimistic(&self) -> Classification {
        self.state.classification
    }

    #[must_use]
    pub fn service(&self) -> Rc<dyn IdentityService> {
        Rc::clone(&self.service)
    }

    /// Resolve the current session against the identity service.
    ///
    /// Runs at most once per provider. Later calls return the current
    /// classification without a remote call. A failed call is not retried.
    pub async fn resolve_session(&mut self) -> Classification {
        let Some(ticket) = self.begin_resolution() else {
            return self.state.classification;
        };
        let service = self.service();
        let result = service.get_current_user().await;
        self.complete_resolution(ticket, result)
    }

    /// Start the single resolution. `None` if one was already started.
    pub fn begin_resolution(&mut self) -> Option<ResolutionTicket> {
        if self.resolution != Resolution::NotStarted {
            tracing::warn!(resolution = ?self.resolution, "session resolution already started; ignoring");
            return None;
        }
        self.resolution = Resolution::InFlight;
        Some(ResolutionTicket { epoch: self.epoch })
    }

    /// Apply the outcome of the remote session check.
    ///
    /// Failures and empty sessions both settle to anonymous and clear the
    /// cache. If `login`/`logout` ran while the check was outstanding, their
    /// state wins and the remote result is dropped.
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        result: Result<Option<SessionIdentity>, RemoteError>,
    ) -> Classification {
        self.resolution = Resolution::Settled;
        self.state.status = LoadStatus::Loaded;

        if ticket.epoch != self.epoch {
            tracing::debug!("session changed during resolution; dropping remote result");
            return self.state.classification;
        }

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "error checking authentication; treating as signed out");
                None
            }
        };
        self.set_user(user);
        tracing::info!(classification = %self.state.classification, "session resolved");
        self.state.classification
    }

    /// Record a freshly signed-in identity and persist it.
    ///
    /// The privilege policy is re-applied here exactly as in resolution.
    pub fn login(&mut self, identity: SessionIdentity) -> Classification {
        self.epoch += 1;
        self.state.status = LoadStatus::Loaded;
        self.set_user(Some(identity));
        tracing::info!(classification = %self.state.classification, "signed in");
        self.state.classification
    }

    /// Forget the current identity and clear the cache. Local only; hosts end
    /// the remote session through [`IdentityService::sign_out`].
    pub fn logout(&mut self) {
        self.epoch += 1;
        self.state.status = LoadStatus::Loaded;
        self.set_user(None);
        tracing::info!("signed out");
    }

    fn set_user(&mut self, user: Option<SessionIdentity>) {
        self.state.classification = classify(user.as_ref(), self.policy.as_ref());
        self.cache.save(user.as_ref());
        self.state.user = user;
    }
}
