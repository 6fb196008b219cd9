use super::*;

#[test]
fn show_sets_text_and_bumps_seq() {
    let mut state = NoticeState::default();
    assert_eq!(state.show("first"), 1);
    assert_eq!(state.show("second"), 2);
    assert_eq!(state.text.as_deref(), Some("second"));
}

#[test]
fn dismiss_clears_matching_message() {
    let mut state = NoticeState::default();
    let seq = state.show("Email or password does not match records.");
    state.dismiss(seq);
    assert_eq!(state.text, None);
}

#[test]
fn stale_dismiss_keeps_newer_message() {
    let mut state = NoticeState::default();
    let old = state.show("old");
    state.show("new");
    state.dismiss(old);
    assert_eq!(state.text.as_deref(), Some("new"));
}
