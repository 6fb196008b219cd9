//! Root application component with routing and the auth context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the single `AuthProvider`, provides it as context and starts
//! the one session resolution. Routes are not mounted until that resolution
//! finishes, so no guard ever decides on an unresolved session. Until then
//! the loader is the only thing on screen.

use std::rc::Rc;

use auth::signin::Portal;
use auth::{Access, AuthProvider, AuthState, Screen, SessionCache};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::loader::Loader;
use crate::net::api::{admin_ids, identity_service};
use crate::pages::{
    not_found::NotFoundPage, reset_password::ResetPasswordPage, screen::ScreenPage, signin::SignInPage,
};
use crate::state::auth::AuthContext;
use crate::util::auth::Protected;
use crate::util::storage::BrowserStorage;

/// A content screen behind the guard for its access level.
fn guarded(screen: Screen) -> impl IntoView {
    let access = screen.access().unwrap_or(Access::General);
    view! {
        <Protected access=access>
            <ScreenPage screen=screen />
        </Protected>
    }
}

/// Keep the session a redirect left in the URL fragment, then drop the
/// fragment so a reload does not adopt it again.
#[cfg(feature = "csr")]
fn adopt_redirect_session() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let Ok(hash) = location.hash() else {
        return;
    };
    if !crate::net::api::adopt_fragment_token(&BrowserStorage, &hash) {
        return;
    }
    let path = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)) {
            log::warn!("could not clear redirect fragment: {e:?}");
        }
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    #[cfg(feature = "csr")]
    adopt_redirect_session();

    let provider = AuthProvider::init(
        identity_service(BrowserStorage),
        Rc::new(admin_ids()),
        SessionCache::new(BrowserStorage),
    );
    let auth = AuthContext::new(provider);
    provide_context(auth);

    #[cfg(feature = "csr")]
    auth.resolve();

    let resolved = move || !auth.state.with(AuthState::is_loading);

    view! {
        <Title text="Storefront" />

        <Show when=resolved fallback=|| view! { <Loader /> }>
            <Router>
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=StaticSegment("book") view=|| view! { <ScreenPage screen=Screen::Book /> } />
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage />
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("signin"))
                        view=|| view! { <SignInPage portal=Portal::Storefront /> }
                    />
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("signup"))
                        view=|| view! { <ScreenPage screen=Screen::SignUp /> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("auth"), StaticSegment("signin"))
                        view=|| view! { <SignInPage portal=Portal::Admin /> }
                    />

                    <Route path=StaticSegment("") view=|| guarded(Screen::Dashboard) />
                    <Route path=StaticSegment("calendar") view=|| guarded(Screen::Calendar) />
                    <Route path=StaticSegment("profile") view=|| guarded(Screen::Profile) />
                    <Route path=StaticSegment("settings") view=|| guarded(Screen::Settings) />
                    <Route path=StaticSegment("tables") view=|| guarded(Screen::Tables) />

                    <Route path=StaticSegment("admin") view=|| guarded(Screen::AdminDashboard) />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("orders"))
                        view=|| guarded(Screen::AdminOrders)
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("users"))
                        view=|| guarded(Screen::AdminUsers)
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("sales"))
                        view=|| guarded(Screen::AdminSales)
                    />
                </Routes>
            </Router>
        </Show>
    }
}
