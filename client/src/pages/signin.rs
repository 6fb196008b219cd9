//! Sign-in screens for the storefront and the admin portal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both portals share this page. The form validates on blur and on submit;
//! the service call runs in a local task and its result is applied through
//! `AuthContext`, which logs the user in and picks the destination.
//!
//! ERROR HANDLING
//! ==============
//! Field problems render inline. Service failures become a transient notice
//! that dismisses itself after `AUTH_MESSAGE_DISMISS`.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use auth::Screen;
use auth::signin::{AUTH_MESSAGE_DISMISS, Field, FieldErrors, Portal, blur_error, validate_credentials};
#[cfg(feature = "csr")]
use auth::{OAuthProvider, signin::OAuthStart};
use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::pages::screen::screen_title;
use crate::state::auth::use_auth;
use crate::util::notice::Notice;

pub fn portal_screen(portal: Portal) -> Screen {
    match portal {
        Portal::Storefront => Screen::SignIn,
        Portal::Admin => Screen::AdminSignIn,
    }
}

pub fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Sign in" }
}

/// Replace the message for `field` after it loses focus.
pub fn apply_blur(errors: &mut FieldErrors, field: Field, value: &str) {
    let message = blur_error(field, value);
    match field {
        Field::Email => errors.email = message,
        Field::Password => errors.password = message,
    }
}

#[cfg(feature = "csr")]
fn browser_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[component]
pub fn SignInPage(portal: Portal) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let busy = RwSignal::new(false);
    let notice = Notice::new(AUTH_MESSAGE_DISMISS);

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            let email_value = email.get().trim().to_owned();
            let password_value = password.get();
            if let Err(field_errors) = validate_credentials(&email_value, &password_value) {
                errors.set(field_errors);
                return;
            }
            errors.set(FieldErrors::default());
            let Some(service) = auth.service() else {
                return;
            };
            busy.set(true);

            #[cfg(feature = "csr")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let result = service
                        .sign_in_with_password(&email_value, &password_value)
                        .await;
                    match auth.apply_sign_in(portal, result) {
                        Ok(signed_in) => navigate(signed_in.destination, NavigateOptions::default()),
                        Err(e) => {
                            if let Some(message) = e.user_message() {
                                notice.flash(message);
                            }
                        }
                    }
                    busy.try_set(false);
                });
            }
            #[cfg(not(feature = "csr"))]
            let _ = (service, &navigate);
        }
    };

    let on_google = move |_| {
        if busy.get() {
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
                let options = crate::net::api::oauth_options(browser_origin().as_deref(), portal);
                let result = service
                    .sign_in_with_oauth(OAuthProvider::Google, &options)
                    .await;
                match auth.apply_oauth(portal, result) {
                    Ok(OAuthStart::Redirect(url)) => {
                        if let Some(window) = web_sys::window() {
                            if let Err(e) = window.location().set_href(&url) {
                                log::error!("oauth redirect failed: {e:?}");
                            }
                        }
                    }
                    Ok(OAuthStart::SignedIn(signed_in)) => {
                        navigate(signed_in.destination, NavigateOptions::default());
                    }
                    Err(e) => {
                        if let Some(message) = e.user_message() {
                            notice.flash(message);
                        }
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (service, &navigate);
    };

    let on_email_blur = move |_| errors.update(|e| apply_blur(e, Field::Email, email.get_untracked().trim()));
    let on_password_blur = move |_| errors.update(|e| apply_blur(e, Field::Password, &password.get_untracked()));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{screen_title(portal_screen(portal))}</h1>
                <form class="login-form" on:submit=on_submit novalidate=true>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        on:blur=on_email_blur
                    />
                    <Show when=move || errors.with(|e| e.email.is_some())>
                        <p class="login-field-error">{move || errors.with(|e| e.email.unwrap_or_default())}</p>
                    </Show>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        on:blur=on_password_blur
                    />
                    <Show when=move || errors.with(|e| e.password.is_some())>
                        <p class="login-field-error">{move || errors.with(|e| e.password.unwrap_or_default())}</p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
                <div class="login-divider"></div>
                <button class="login-button" type="button" disabled=move || busy.get() on:click=on_google>
                    "Sign in with Google"
                </button>
                <Show when=move || notice.text().is_some()>
                    <p class="login-message">{move || notice.text().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
