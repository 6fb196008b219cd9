use super::*;
use crate::classify::Classification;
use crate::identity::SessionIdentity;
use crate::provider::LoadStatus;

fn loaded(classification: Classification) -> AuthState {
    let user = classification
        .is_authenticated()
        .then(|| SessionIdentity::new("u1"));
    AuthState { status: LoadStatus::Loaded, user, classification }
}

// =============================================================
// Screen::from_path
// =============================================================

#[test]
fn from_path_round_trips_every_screen() {
    for screen in Screen::ALL {
        assert_eq!(Screen::from_path(screen.path()), Some(screen));
    }
}

#[test]
fn from_path_ignores_trailing_slash_and_query() {
    assert_eq!(Screen::from_path("/admin/orders/"), Some(Screen::AdminOrders));
    assert_eq!(Screen::from_path("/profile?tab=2#top"), Some(Screen::Profile));
    assert_eq!(Screen::from_path(""), Some(Screen::Dashboard));
}

#[test]
fn from_path_unknown_is_none() {
    assert_eq!(Screen::from_path("/admin/secret"), None);
}

#[test]
fn sign_in_screens_are_public() {
    assert_eq!(Screen::SignIn.access(), None);
    assert_eq!(Screen::AdminSignIn.access(), None);
}

// =============================================================
// route
// =============================================================

#[test]
fn loading_state_always_shows_loader() {
    let state = AuthState::default();
    for screen in Screen::ALL {
        assert_eq!(route(&state, screen.path()), RouteOutcome::Loading);
    }
    assert_eq!(route(&state, "/nowhere"), RouteOutcome::Loading);
}

#[test]
fn anonymous_is_redirected_from_general_screens() {
    let outcome = route(&loaded(Classification::Anonymous), "/");
    assert_eq!(outcome, RouteOutcome::Redirect(Navigation::replace("/auth/signin")));
}

#[test]
fn anonymous_is_redirected_from_admin_screens_to_admin_signin() {
    let outcome = route(&loaded(Classification::Anonymous), "/admin/users");
    assert_eq!(outcome, RouteOutcome::Redirect(Navigation::replace("/admin/auth/signin")));
}

#[test]
fn authenticated_reaches_general_but_not_admin() {
    let state = loaded(Classification::Authenticated);
    assert_eq!(route(&state, "/settings"), RouteOutcome::Render(Screen::Settings));
    assert_eq!(route(&state, "/admin"), RouteOutcome::Redirect(Navigation::replace("/admin/auth/signin")));
}

#[test]
fn privileged_reaches_everything() {
    let state = loaded(Classification::Privileged);
    for screen in Screen::ALL {
        assert_eq!(route(&state, screen.path()), RouteOutcome::Render(screen));
    }
}

#[test]
fn public_screens_render_for_anonymous() {
    let state = loaded(Classification::Anonymous);
    assert_eq!(route(&state, "/auth/signin"), RouteOutcome::Render(Screen::SignIn));
    assert_eq!(route(&state, "/book"), RouteOutcome::Render(Screen::Book));
}

#[test]
fn unknown_path_is_not_found() {
    assert_eq!(route(&loaded(Classification::Privileged), "/nope"), RouteOutcome::NotFound);
}
