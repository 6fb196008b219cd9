use super::*;

const BASE: &str = "https://proj.example.co";

// =============================================================================
// endpoints
// =============================================================================

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(user_endpoint(BASE), "https://proj.example.co/auth/v1/user");
    assert_eq!(logout_endpoint(BASE), "https://proj.example.co/auth/v1/logout");
    assert_eq!(
        password_token_endpoint(BASE),
        "https://proj.example.co/auth/v1/token?grant_type=password"
    );
}

#[test]
fn authorize_url_without_options() {
    let url = authorize_url(BASE, OAuthProvider::GitHub, &OAuthOptions::default());
    assert_eq!(url, "https://proj.example.co/auth/v1/authorize?provider=github");
}

#[test]
fn authorize_url_encodes_redirect_and_params_in_order() {
    let options = OAuthOptions::offline_consent().redirect_to("https://shop.test/?from=signin");
    let url = authorize_url(BASE, OAuthProvider::Google, &options);
    assert_eq!(
        url,
        "https://proj.example.co/auth/v1/authorize?provider=google\
         &redirect_to=https%3A%2F%2Fshop.test%2F%3Ffrom%3Dsignin\
         &access_type=offline&prompt=consent"
    );
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn parse_user_reads_identity() {
    let user = parse_user(r#"{"id":"u1","email":"a@b.com","aud":"authenticated"}"#).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
}

#[test]
fn parse_user_rejects_garbage() {
    assert!(matches!(parse_user("<html>"), Err(RemoteError::Parse(_))));
}

#[test]
fn parse_token_response_reads_token_and_user() {
    let body = r#"{
        "access_token": "jwt.abc",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "r1",
        "user": { "id": "u1", "email": "a@b.com" }
    }"#;
    let session = parse_token_response(body).unwrap();
    assert_eq!(session.access_token, "jwt.abc");
    assert_eq!(session.user.id, "u1");
}

#[test]
fn parse_token_response_requires_user() {
    assert!(parse_token_response(r#"{"access_token":"t"}"#).is_err());
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn error_message_prefers_msg_then_description() {
    assert_eq!(error_message(r#"{"code":422,"msg":"Password too weak"}"#), "Password too weak");
    assert_eq!(
        error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
        "Invalid login credentials"
    );
    assert_eq!(error_message(r#"{"error":"boom"}"#), "boom");
    assert_eq!(error_message("plain text"), "plain text");
}

#[test]
fn sign_in_error_maps_statuses() {
    assert!(matches!(sign_in_error(400, String::new()), RemoteError::InvalidCredentials));
    assert!(matches!(sign_in_error(401, String::new()), RemoteError::InvalidCredentials));
    assert!(matches!(
        sign_in_error(422, r#"{"msg":"Email not confirmed"}"#.into()),
        RemoteError::Validation(m) if m == "Email not confirmed"
    ));
    assert!(matches!(sign_in_error(500, "x".into()), RemoteError::Response { status: 500, .. }));
}

#[test]
fn current_user_result_maps_statuses() {
    let user = current_user_result(200, r#"{"id":"u1","email":"a@b.com"}"#.into()).unwrap().unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(current_user_result(401, String::new()).unwrap(), None);
    assert_eq!(current_user_result(403, String::new()).unwrap(), None);
    assert!(matches!(current_user_result(200, "not json".into()), Err(RemoteError::Parse(_))));
    assert!(matches!(
        current_user_result(500, "down".into()),
        Err(RemoteError::Response { status: 500, body }) if body == "down"
    ));
}

#[test]
fn update_result_maps_statuses() {
    assert!(update_result(200, String::new()).is_ok());
    assert!(matches!(
        update_result(422, r#"{"msg":"Password should be at least 6 characters"}"#.into()),
        Err(RemoteError::Validation(m)) if m == "Password should be at least 6 characters"
    ));
    assert!(matches!(update_result(401, String::new()), Err(RemoteError::Response { status: 401, .. })));
}

#[test]
fn sign_out_result_treats_unknown_session_as_signed_out() {
    for status in [200, 204, 401, 403, 404] {
        assert!(sign_out_result(status, String::new()).is_ok(), "status {status}");
    }
    assert!(matches!(sign_out_result(500, String::new()), Err(RemoteError::Response { status: 500, .. })));
}

// =============================================================================
// client behavior without network
// =============================================================================

fn client() -> HostedIdentityClient {
    HostedIdentityClient::new(HostedConfig::new(BASE, "anon")).unwrap()
}

#[tokio::test]
async fn get_current_user_without_token_is_none() {
    assert_eq!(client().get_current_user().await.unwrap(), None);
}

#[tokio::test]
async fn update_user_without_token_is_validation_error() {
    let err = client()
        .update_user(&UserUpdate { password: "secret1".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Validation(_)));
}

#[tokio::test]
async fn sign_in_with_oauth_returns_redirect() {
    let outcome = client()
        .sign_in_with_oauth(OAuthProvider::Google, &OAuthOptions::offline_consent())
        .await
        .unwrap();
    let OAuthOutcome::Redirect { url } = outcome else {
        panic!("expected redirect");
    };
    assert!(url.starts_with("https://proj.example.co/auth/v1/authorize?provider=google"));
    assert!(url.contains("prompt=consent"));
}

#[test]
fn empty_access_token_is_dropped() {
    let client = client().with_access_token(Some(String::new()));
    assert_eq!(client.access_token(), None);
    client.set_access_token(Some("t1".into()));
    assert_eq!(client.access_token().as_deref(), Some("t1"));
}

#[test]
fn token_store_resumes_and_writes_through() {
    let store = std::rc::Rc::new(crate::store::MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "persisted").unwrap();

    let client = client().with_token_store(store.clone());
    assert_eq!(client.access_token().as_deref(), Some("persisted"));

    client.set_access_token(Some("fresh".into()));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));

    client.set_access_token(None);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[test]
fn rejected_token_is_cleared_from_token_store() {
    let store = std::rc::Rc::new(crate::store::MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "stale").unwrap();
    let client = client().with_token_store(store.clone());

    assert_eq!(client.apply_current_user(401, String::new()).unwrap(), None);
    assert_eq!(client.access_token(), None);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[test]
fn server_error_keeps_token() {
    let store = std::rc::Rc::new(crate::store::MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "good").unwrap();
    let client = client().with_token_store(store.clone());

    assert!(client.apply_current_user(503, String::new()).is_err());
    assert_eq!(client.access_token().as_deref(), Some("good"));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("good"));
}

#[tokio::test]
async fn sign_out_without_token_is_noop() {
    client().sign_out().await.unwrap();
}

// =============================================================================
// redirect fragments
// =============================================================================

#[test]
fn fragment_token_is_extracted_and_decoded() {
    let fragment = "#access_token=abc%2Edef&expires_in=3600&token_type=bearer&type=recovery";
    assert_eq!(access_token_from_fragment(fragment).as_deref(), Some("abc.def"));
}

#[test]
fn fragment_without_token_is_none() {
    assert_eq!(access_token_from_fragment(""), None);
    assert_eq!(access_token_from_fragment("#error=access_denied"), None);
    assert_eq!(access_token_from_fragment("#access_token="), None);
}
