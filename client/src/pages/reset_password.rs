//! Reset-password screen reached from a recovery link.
//!
//! The recovery link signs the visitor in through the URL fragment (adopted by
//! `App` before the session resolves), so the update runs against that session.
//! Mismatched entries are rejected before any remote call.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use auth::reset::{ResetError, check_passwords};
#[cfg(feature = "csr")]
use auth::reset::{RESET_SUCCESS_MESSAGE, reset_password};
use auth::signin::AUTH_MESSAGE_DISMISS;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;
use crate::util::notice::Notice;

/// Local check run on submit; the message to flash if it fails.
pub fn precheck(new_password: &str, reentered: &str) -> Result<(), &'static str> {
    check_passwords(new_password, reentered).map_err(|e: ResetError| e.user_message())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let new_password = RwSignal::new(String::new());
    let reentered = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = Notice::new(AUTH_MESSAGE_DISMISS);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let new_value = new_password.get();
        let reentered_value = reentered.get();
        if let Err(message) = precheck(&new_value, &reentered_value) {
            notice.flash(message);
            return;
        }
        let Some(service) = auth.service() else {
            return;
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match reset_password(service.as_ref(), &new_value, &reentered_value).await {
                    Ok(destination) => {
                        notice.flash(RESET_SUCCESS_MESSAGE);
                        gloo_timers::future::sleep(AUTH_MESSAGE_DISMISS).await;
                        navigate(destination, leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        log::error!("password update failed: {e}");
                        notice.flash(e.user_message());
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (service, &navigate, new_value, reentered_value);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="New password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| new_password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Re-enter password"
                        prop:value=move || reentered.get()
                        on:input=move |ev| reentered.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Update password"
                    </button>
                </form>
                <Show when=move || notice.text().is_some()>
                    <p class="login-message">{move || notice.text().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
