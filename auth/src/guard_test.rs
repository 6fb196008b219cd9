use super::*;

#[test]
fn denied_without_target_redirects_to_signin() {
    let decision = guard(Some(false), None, "dashboard");
    assert_eq!(decision, GuardDecision::Redirect(Navigation { to: "/auth/signin".into(), replace: true }));
}

#[test]
fn denied_with_target_redirects_there() {
    let decision = guard(Some(false), Some(ADMIN_REDIRECT), "orders");
    assert_eq!(decision.navigation().map(|n| n.to.as_str()), Some("/admin/auth/signin"));
    assert!(decision.navigation().is_some_and(|n| n.replace));
}

#[test]
fn allowed_renders_content_unchanged() {
    let content = vec![1, 2, 3];
    let decision = guard(Some(true), Some(ADMIN_REDIRECT), content.clone());
    assert_eq!(decision, GuardDecision::Render(content));
    assert!(decision.navigation().is_none());
}

#[test]
fn unresolved_never_redirects() {
    let decision = guard(None, None, "dashboard");
    assert_eq!(decision, GuardDecision::Withheld);
    assert!(decision.navigation().is_none());
}

#[test]
fn access_maps_to_redirect_targets() {
    assert_eq!(Access::General.redirect(), DEFAULT_REDIRECT);
    assert_eq!(Access::Admin.redirect(), ADMIN_REDIRECT);
}

#[test]
fn map_preserves_decision_kind() {
    assert_eq!(guard(Some(true), None, 2).map(|n| n * 10), GuardDecision::Render(20));
    assert_eq!(guard(None, None, 2).map(|n| n * 10), GuardDecision::Withheld);
    assert!(guard(Some(false), None, 2).map(|n| n * 10).navigation().is_some());
}
