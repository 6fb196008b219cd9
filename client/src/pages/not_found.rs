//! Fallback for paths outside the route table.

use leptos::prelude::*;

pub const NOT_FOUND_MESSAGE: &str = "There's nothing here, 404 error";

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found">
            <p>{NOT_FOUND_MESSAGE}</p>
            <a href="/">"Back to the storefront"</a>
        </main>
    }
}
