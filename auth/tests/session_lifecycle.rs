//! End-to-end session lifecycle: cache, resolution, login and route access
//! through the public API with an in-memory identity service.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use auth::classify::DEFAULT_ADMIN_ID;
use auth::{
    AllowList, AuthProvider, Classification, IdentityService, MemoryStore, Navigation, OAuthOptions, OAuthOutcome,
    OAuthProvider, RemoteError, RouteOutcome, Screen, SessionCache, SessionIdentity, UserUpdate, route,
};

// =========================================================================
// Mock identity service: one remote session shared across "page loads".
// =========================================================================

#[derive(Default)]
struct RemoteSession {
    current: RefCell<Option<SessionIdentity>>,
    network_down: Cell<bool>,
}

#[async_trait::async_trait(?Send)]
impl IdentityService for RemoteSession {
    async fn get_current_user(&self) -> Result<Option<SessionIdentity>, RemoteError> {
        if self.network_down.get() {
            return Err(RemoteError::Network("failed to fetch".into()));
        }
        Ok(self.current.borrow().clone())
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<SessionIdentity, RemoteError> {
        Err(RemoteError::InvalidCredentials)
    }

    async fn sign_in_with_oauth(
        &self,
        _provider: OAuthProvider,
        _options: &OAuthOptions,
    ) -> Result<OAuthOutcome, RemoteError> {
        Err(RemoteError::Provider("disabled".into()))
    }

    async fn update_user(&self, _update: &UserUpdate) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        self.current.borrow_mut().take();
        Ok(())
    }
}

/// One application load: a fresh provider over the shared store and service.
fn page_load(remote: &Rc<RemoteSession>, store: &Rc<MemoryStore>) -> AuthProvider {
    AuthProvider::init(
        Rc::clone(remote) as Rc<dyn IdentityService>,
        Rc::new(AllowList::default()),
        SessionCache::new(Rc::clone(store)),
    )
}

async fn login_then_reload(identity: SessionIdentity, expected: Classification) {
    let remote = Rc::new(RemoteSession::default());
    let store = Rc::new(MemoryStore::new());

    let mut first = page_load(&remote, &store);
    first.resolve_session().await;
    *remote.current.borrow_mut() = Some(identity.clone());
    assert_eq!(first.login(identity), expected);

    let mut reloaded = page_load(&remote, &store);
    assert_eq!(reloaded.optimistic(), expected);
    assert_eq!(route(reloaded.state(), "/"), RouteOutcome::Loading);

    assert_eq!(reloaded.resolve_session().await, expected);
}

#[tokio::test]
async fn login_round_trip_through_reload_non_admin() {
    login_then_reload(SessionIdentity::new("7d0e3c55-1111-4c3b-9d59-5a1f7b3e2c10"), Classification::Authenticated)
        .await;
}

#[tokio::test]
async fn login_round_trip_through_reload_admin() {
    login_then_reload(SessionIdentity::new(DEFAULT_ADMIN_ID), Classification::Privileged).await;
}

#[tokio::test]
async fn network_failure_settles_anonymous_and_redirects() {
    let remote = Rc::new(RemoteSession::default());
    let store = Rc::new(MemoryStore::new());
    SessionCache::new(Rc::clone(&store)).save(Some(&SessionIdentity::new("u1")));
    remote.network_down.set(true);

    let mut provider = page_load(&remote, &store);
    assert_eq!(provider.resolve_session().await, Classification::Anonymous);
    assert!(SessionCache::new(Rc::clone(&store)).load().is_none());
    assert_eq!(route(provider.state(), "/"), RouteOutcome::Redirect(Navigation::replace("/auth/signin")));
    assert_eq!(route(provider.state(), "/profile"), RouteOutcome::Redirect(Navigation::replace("/auth/signin")));
}

#[tokio::test]
async fn allow_listed_session_reaches_admin_and_general_screens() {
    let remote = Rc::new(RemoteSession::default());
    *remote.current.borrow_mut() = Some(SessionIdentity::new("b9522e4b-2a7a-4e7f-ad5c-068fb7b13165"));
    let store = Rc::new(MemoryStore::new());

    let mut provider = page_load(&remote, &store);
    assert_eq!(provider.resolve_session().await, Classification::Privileged);
    assert_eq!(route(provider.state(), "/admin/orders"), RouteOutcome::Render(Screen::AdminOrders));
    assert_eq!(route(provider.state(), "/"), RouteOutcome::Render(Screen::Dashboard));
}

#[tokio::test]
async fn nothing_is_routed_before_resolution() {
    let remote = Rc::new(RemoteSession::default());
    *remote.current.borrow_mut() = Some(SessionIdentity::new(DEFAULT_ADMIN_ID));
    let store = Rc::new(MemoryStore::new());

    let mut provider = page_load(&remote, &store);
    for screen in Screen::ALL {
        assert_eq!(route(provider.state(), screen.path()), RouteOutcome::Loading);
    }
    provider.resolve_session().await;
    assert!(!provider.state().is_loading());
}

#[tokio::test]
async fn logout_then_reload_is_anonymous_before_and_after_resolution() {
    let remote = Rc::new(RemoteSession::default());
    *remote.current.borrow_mut() = Some(SessionIdentity::new("u1"));
    let store = Rc::new(MemoryStore::new());

    let mut provider = page_load(&remote, &store);
    provider.resolve_session().await;
    provider.service().sign_out().await.unwrap();
    provider.logout();
    assert!(remote.current.borrow().is_none());

    let mut reloaded = page_load(&remote, &store);
    assert_eq!(reloaded.optimistic(), Classification::Anonymous);
    assert_eq!(reloaded.resolve_session().await, Classification::Anonymous);
}
