use super::*;
use crate::net::api::ApiErrorKind;
use crate::net::transport::{HttpResponse, Method, TransportError};
use crate::test_support::{MockTransport, RecordingNotifier};
use crate::util::validation::Field;

const OK_BODY: &str = r#"{"statusCode":200,"message":"ok","data":{"userId":"u1","accessToken":"tok123"}}"#;

fn manager<'a>(
    transport: &'a MockTransport,
    notifier: &'a RecordingNotifier,
    session: &Session,
) -> AuthManager<&'a MockTransport, &'a RecordingNotifier> {
    let api = ApiClient::new("http://localhost:4000/", transport, session.clone());
    AuthManager::new(api, AuthEndpoints::default(), notifier)
}

fn ok(body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse { status: 200, status_text: "OK".to_owned(), body: body.to_owned() })
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_idle() {
    let state = AuthState::default();
    assert_eq!(state.sign_in, Phase::Idle);
    assert_eq!(state.sign_up, Phase::Idle);
    assert_eq!(state.social, Phase::Idle);
    assert!(!state.is_busy());
    assert!(state.return_to.is_none());
}

#[test]
fn auth_state_tracks_pending_and_result() {
    let mut state = AuthState::default();
    state.begin(AuthOperation::SignIn);
    assert_eq!(state.phase(AuthOperation::SignIn), Phase::Pending);
    assert!(state.is_busy());

    state.finish::<()>(AuthOperation::SignIn, &Err(AuthError::UnsupportedProvider(SocialProvider::Apple)));
    assert_eq!(state.sign_in, Phase::Failed);
    assert!(!state.is_busy());

    state.begin(AuthOperation::Social(SocialProvider::Google));
    state.finish(AuthOperation::Social(SocialProvider::Google), &Ok(()));
    assert_eq!(state.social, Phase::Succeeded);
}

#[test]
fn take_return_to_defaults_to_root_and_clears() {
    let mut state = AuthState { return_to: Some("/reports".to_owned()), ..AuthState::default() };
    assert_eq!(state.take_return_to(), "/reports");
    assert_eq!(state.take_return_to(), "/");
}

#[test]
fn failure_headings_name_the_operation() {
    assert_eq!(AuthOperation::SignIn.failure_heading(), "Signin Failed!");
    assert_eq!(AuthOperation::SignUp.failure_heading(), "Signup Failed!");
    assert_eq!(AuthOperation::Social(SocialProvider::Google).failure_heading(), "Google Login Failed!");
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_persists_token_without_popup() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let resp = auth.login(&Credentials::sign_in("user@test.com", "Abcdef1!")).await.unwrap();
    assert_eq!(resp.user_id, "u1");
    assert_eq!(session.token().as_deref(), Some("tok123"));
    assert!(notifier.popups().is_empty());

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://localhost:4000/auth/signin");
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({ "email": "user@test.com", "password": "Abcdef1!" }));
}

#[tokio::test]
async fn login_rejection_shows_error_popup_and_keeps_token() {
    let transport = MockTransport::replying(401, "Unauthorized", r#"{"message":"Invalid credentials"}"#);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    session.persist("previous");
    let auth = manager(&transport, &notifier, &session);

    let err = auth.login(&Credentials::sign_in("user@test.com", "Abcdef1!")).await.unwrap_err();
    let AuthError::Api(api_err) = err else {
        panic!("expected api error");
    };
    assert_eq!(api_err.status, 401);
    assert_eq!(session.token().as_deref(), Some("previous"));
    assert_eq!(
        notifier.popups(),
        vec![PopupRequest::new("Signin Failed!", "Invalid credentials").with_variant(PopupVariant::Error)]
    );
}

#[tokio::test]
async fn login_with_invalid_input_sends_nothing() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let err = auth.login(&Credentials::sign_in("not-an-email", "Abcdef1!")).await.unwrap_err();
    let errors = err.field_errors().unwrap();
    assert!(errors.contains(Field::Email));
    assert_eq!(transport.request_count(), 0);
    assert!(notifier.popups().is_empty());
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn network_failure_surfaces_transport_message() {
    let transport = MockTransport::new(vec![Err(TransportError("offline".to_owned()))]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let err = auth.login(&Credentials::sign_in("user@test.com", "Abcdef1!")).await.unwrap_err();
    assert!(matches!(err, AuthError::Api(ApiError { kind: ApiErrorKind::Network, .. })));
    let popups = notifier.popups();
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].heading, "Signin Failed!");
    assert!(popups[0].message.contains("offline"));
}

#[tokio::test]
async fn second_login_overwrites_token() {
    let second = r#"{"statusCode":200,"message":"ok","data":{"userId":"u1","accessToken":"tok456"}}"#;
    let transport = MockTransport::new(vec![ok(OK_BODY), ok(second)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);
    let creds = Credentials::sign_in("user@test.com", "Abcdef1!");

    auth.login(&creds).await.unwrap();
    auth.login(&creds).await.unwrap();
    assert_eq!(session.token().as_deref(), Some("tok456"));
    // The second request already carried the first token.
    assert_eq!(transport.last_request().header("Authorization"), Some("Bearer tok123"));
}

#[tokio::test]
async fn overlapping_logins_each_dispatch_and_last_response_wins() {
    let second = r#"{"statusCode":200,"message":"ok","data":{"userId":"u1","accessToken":"tok456"}}"#;
    // The first request's reply lands after the second one.
    let transport = MockTransport::new(vec![ok(OK_BODY), ok(second)]).with_yields(vec![3, 0]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);
    let creds = Credentials::sign_in("user@test.com", "Abcdef1!");

    let (first, second) = tokio::join!(auth.login(&creds), auth.login(&creds));
    assert_eq!(first.unwrap().access_token, "tok123");
    assert_eq!(second.unwrap().access_token, "tok456");
    assert_eq!(transport.request_count(), 2);
    assert_eq!(session.token().as_deref(), Some("tok123"));
    assert!(notifier.popups().is_empty());
}

// =============================================================
// sign_up
// =============================================================

#[tokio::test]
async fn sign_up_with_mismatched_passwords_never_reaches_network() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let creds = Credentials::sign_up("Ada", "ada@test.com", "Abcdef1!", "Abcdef2!");
    let err = auth.sign_up(&creds).await.unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
    assert!(!errors.contains(Field::Password));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn sign_up_success_posts_all_fields_and_persists() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let creds = Credentials::sign_up(" Ada Lovelace ", "ada@test.com", "Abcdef1!", "Abcdef1!");
    auth.sign_up(&creds).await.unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.url, "http://localhost:4000/auth/signup");
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["fullName"], "Ada Lovelace");
    assert_eq!(body["confirmPassword"], "Abcdef1!");
    assert_eq!(session.token().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn sign_up_failure_uses_signup_heading() {
    let transport = MockTransport::replying(409, "Conflict", r#"{"message":"Email already registered"}"#);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let creds = Credentials::sign_up("Ada", "ada@test.com", "Abcdef1!", "Abcdef1!");
    auth.sign_up(&creds).await.unwrap_err();
    assert_eq!(
        notifier.popups(),
        vec![PopupRequest::new("Signup Failed!", "Email already registered").with_variant(PopupVariant::Error)]
    );
}

// =============================================================
// social_login
// =============================================================

#[tokio::test]
async fn google_code_is_forwarded_and_token_persisted() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    auth.social_login(SocialProvider::Google, SocialPayload::AuthCode("4/abc".to_owned())).await.unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.url, "http://localhost:4000/auth/google");
    assert_eq!(sent.body.as_deref(), Some(r#"{"code":"4/abc"}"#));
    assert_eq!(session.token().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn google_backend_failure_is_error_popup() {
    let transport = MockTransport::replying(400, "Bad Request", r#"{"message":"Code expired"}"#);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    auth.social_login(SocialProvider::Google, SocialPayload::AuthCode("old".to_owned())).await.unwrap_err();
    let popups = notifier.popups();
    assert_eq!(popups[0].variant, PopupVariant::Error);
    assert_eq!(popups[0].heading, "Google Login Failed!");
    assert_eq!(popups[0].message, "Code expired");
}

#[tokio::test]
async fn apple_login_is_info_popup_without_request() {
    let transport = MockTransport::new(vec![ok(OK_BODY)]);
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let err = auth.social_login(SocialProvider::Apple, SocialPayload::AuthCode("ignored".to_owned())).await.unwrap_err();
    assert_eq!(err, AuthError::UnsupportedProvider(SocialProvider::Apple));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(
        notifier.popups(),
        vec![PopupRequest::new("Apple Login Failed!", "Apple Login Not Implemented Yet")]
    );
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn google_sdk_failure_is_info_popup_without_request() {
    let transport = MockTransport::default();
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    let auth = manager(&transport, &notifier, &session);

    let err = auth
        .social_login(SocialProvider::Google, SocialPayload::Failed("popup_closed".to_owned()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::Provider { provider: SocialProvider::Google, message: "popup_closed".to_owned() }
    );
    assert_eq!(transport.request_count(), 0);
    assert_eq!(notifier.popups(), vec![PopupRequest::new("Google Login Failed!", "popup_closed")]);
}

// =============================================================
// sign_out
// =============================================================

#[test]
fn sign_out_clears_the_token_slot() {
    let transport = MockTransport::default();
    let notifier = RecordingNotifier::default();
    let session = Session::in_memory();
    session.persist("tok123");
    let auth = manager(&transport, &notifier, &session);

    auth.sign_out();
    assert_eq!(session.token(), None);
}
