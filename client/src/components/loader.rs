//! Full-page placeholder shown while the session is being resolved.

use leptos::prelude::*;

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader" role="status" aria-live="polite">
            <span class="loader__spinner"></span>
            <span class="loader__label">"Loading..."</span>
        </div>
    }
}
