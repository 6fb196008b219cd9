//! Header strip with the signed-in user and a logout button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Logging out clears the provider (and its cache) immediately, then sends the
//! visitor to the sign-in screen of the area they were in.

use auth::{Access, AuthState, Navigation};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{status_label, use_auth};
use crate::util::auth::navigate_options;

#[component]
pub fn SessionBar(access: Access) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let label = move || auth.state.with(status_label);
    let logged_in = move || auth.state.with(AuthState::is_logged_in);
    let on_logout = move |_| {
        auth.logout();
        let nav = Navigation::replace(access.redirect());
        navigate(&nav.to, navigate_options(&nav));
    };

    view! {
        <header class="session-bar">
            <span class="session-bar__user">{label}</span>
            <button
                class="session-bar__logout"
                type="button"
                prop:hidden=move || !logged_in()
                on:click=on_logout
            >
                "Log out"
            </button>
        </header>
    }
}
