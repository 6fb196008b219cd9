use super::*;

#[test]
fn deserialize_keeps_unknown_fields() {
    let raw = r#"{"id":"u1","email":"a@b.com","role":"authenticated","app_metadata":{"provider":"email"}}"#;
    let identity: SessionIdentity = serde_json::from_str(raw).unwrap();
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.email.as_deref(), Some("a@b.com"));
    assert_eq!(identity.extra.get("role").and_then(|v| v.as_str()), Some("authenticated"));

    let back = serde_json::to_value(&identity).unwrap();
    assert_eq!(back["app_metadata"]["provider"], "email");
}

#[test]
fn deserialize_requires_id() {
    assert!(serde_json::from_str::<SessionIdentity>(r#"{"email":"a@b.com"}"#).is_err());
}

#[test]
fn display_name_prefers_name_field() {
    let mut identity = SessionIdentity::new("u1");
    identity.name = Some("Alice".to_owned());
    identity
        .extra
        .insert("user_metadata".to_owned(), serde_json::json!({ "full_name": "Alice Oauth" }));
    assert_eq!(identity.display_name(), Some("Alice"));
}

#[test]
fn display_name_falls_back_to_oauth_metadata() {
    let mut identity = SessionIdentity::new("u1");
    identity
        .extra
        .insert("user_metadata".to_owned(), serde_json::json!({ "full_name": "Bob" }));
    assert_eq!(identity.display_name(), Some("Bob"));
    assert_eq!(SessionIdentity::new("u2").display_name(), None);
}
