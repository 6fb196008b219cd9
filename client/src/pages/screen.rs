//! Content screens of the storefront and the admin area.
//!
//! SYSTEM CONTEXT
//! ==============
//! The screens behind the guards share one frame: the session bar, a nav
//! strip for their area and a titled body.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use auth::{Access, Screen};
use leptos::prelude::*;

use crate::components::session_bar::SessionBar;

pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Book => "Book an appointment",
        Screen::ResetPassword => "Reset password",
        Screen::SignIn => "Sign in",
        Screen::SignUp => "Create an account",
        Screen::AdminSignIn => "Admin sign in",
        Screen::Dashboard => "Dashboard",
        Screen::Calendar => "Calendar",
        Screen::Profile => "Profile",
        Screen::Settings => "Settings",
        Screen::Tables => "Tables",
        Screen::AdminDashboard => "Admin dashboard",
        Screen::AdminOrders => "Orders",
        Screen::AdminUsers => "Users",
        Screen::AdminSales => "Sales",
    }
}

/// Screens listed in the nav strip of an area.
pub fn nav_screens(access: Access) -> Vec<Screen> {
    Screen::ALL
        .into_iter()
        .filter(|s| s.access() == Some(access))
        .collect()
}

#[component]
pub fn ScreenPage(screen: Screen) -> impl IntoView {
    let access = screen.access().unwrap_or(Access::General);
    let links = nav_screens(access)
        .into_iter()
        .map(|s| {
            let class = if s == screen { "screen-nav__link screen-nav__link--active" } else { "screen-nav__link" };
            view! { <a class=class href=s.path()>{screen_title(s)}</a> }
        })
        .collect_view();

    view! {
        <div class="screen">
            <SessionBar access=access />
            <nav class="screen-nav">{links}</nav>
            <main class="screen__body">
                <h1>{screen_title(screen)}</h1>
            </main>
        </div>
    }
}
