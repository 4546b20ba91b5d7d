use std::sync::Arc;

use crate::domain::entities::NewUser;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{InMemoryStore, UserRepository};
use crate::services::auth::AuthService;
use crate::services::otp::tests::mocks::{MockOtpStore, MockSender};
use crate::services::otp::{OtpService, OtpServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

struct Harness {
    auth: AuthService,
    store: InMemoryStore,
    cache: Arc<MockOtpStore>,
    sender: Arc<MockSender>,
}

fn harness() -> Harness {
    let store = InMemoryStore::new();
    let cache = Arc::new(MockOtpStore::default());
    let sender = Arc::new(MockSender::default());
    let otp = Arc::new(OtpService::new(
        cache.clone(),
        sender.clone(),
        OtpServiceConfig::default(),
    ));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()).unwrap());
    let auth = AuthService::new(Arc::new(store.clone()), otp, tokens);
    Harness {
        auth,
        store,
        cache,
        sender,
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "Ada".to_string(),
        country: "NG".to_string(),
        language: "en".to_string(),
    }
}

fn assert_invalid_credential(err: DomainError) {
    assert!(
        matches!(err, DomainError::Auth(AuthError::InvalidCredential)),
        "unexpected error: {:?}",
        err
    );
}

#[tokio::test]
async fn test_register_creates_user_and_sends_code() {
    let h = harness();
    let registration = h.auth.register(new_user("A@X.com")).await.unwrap();

    assert_eq!(registration.user.email, "a@x.com");
    assert!(!registration.user.is_verified);
    assert!(h.cache.value("otp:a@x.com").is_some());

    let sent = h.sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains("set up"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let h = harness();
    h.auth.register(new_user("a@x.com")).await.unwrap();
    let err = h.auth.register(new_user("a@x.com")).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue { field }) if field == "email"
    ));
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let h = harness();
    let err = h.auth.register(new_user("nope")).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidEmail)));
    assert!(h.sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_code_for_unknown_email_still_issued() {
    let h = harness();
    h.auth.request_login_code("ghost@x.com").await.unwrap();
    assert!(h.cache.value("otp:ghost@x.com").is_some());

    // but it can never be exchanged for tokens
    let code = h.cache.value("otp:ghost@x.com").unwrap();
    assert_invalid_credential(h.auth.login("ghost@x.com", &code).await.unwrap_err());
}

#[tokio::test]
async fn test_login_succeeds_exactly_once() {
    let h = harness();
    let registered = h.auth.register(new_user("a@x.com")).await.unwrap();
    h.auth.request_login_code("a@x.com").await.unwrap();
    let code = h.cache.value("otp:a@x.com").unwrap();

    let result = h.auth.login("a@x.com", &code).await.unwrap();
    assert_eq!(result.user.id, registered.user.id);
    assert!(!result.tokens.access_token.is_empty());
    assert!(!result.tokens.refresh_token.is_empty());
    assert!(h.cache.value("otp:a@x.com").is_none());

    assert_invalid_credential(h.auth.login("a@x.com", &code).await.unwrap_err());
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let h = harness();
    h.auth.register(new_user("a@x.com")).await.unwrap();
    let code = h.cache.value("otp:a@x.com").unwrap();
    let wrong = if code == "0000" { "1111" } else { "0000" };

    assert_invalid_credential(h.auth.login("a@x.com", wrong).await.unwrap_err());
    h.cache.expire("otp:a@x.com");
    assert_invalid_credential(h.auth.login("a@x.com", &code).await.unwrap_err());
    assert_invalid_credential(h.auth.login("b@x.com", &code).await.unwrap_err());
}

#[tokio::test]
async fn test_refresh_and_authenticate() {
    let h = harness();
    h.auth.register(new_user("a@x.com")).await.unwrap();
    let code = h.cache.value("otp:a@x.com").unwrap();
    let login = h.auth.login("a@x.com", &code).await.unwrap();

    let (user, claims) = h.auth.authenticate(&login.tokens.access_token).await.unwrap();
    assert_eq!(user.id, login.user.id);
    assert_eq!(claims.sub, user.id.to_string());

    let refreshed = h.auth.refresh(&login.tokens.refresh_token).await.unwrap();
    assert_eq!(refreshed.user.id, user.id);

    // an access token cannot be used to refresh
    let err = h.auth.refresh(&login.tokens.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::WrongTokenType { .. })));
}

#[tokio::test]
async fn test_token_of_deleted_user_rejected() {
    let h = harness();
    h.auth.register(new_user("a@x.com")).await.unwrap();
    let code = h.cache.value("otp:a@x.com").unwrap();
    let login = h.auth.login("a@x.com", &code).await.unwrap();

    UserRepository::delete(&h.store, login.user.id).await.unwrap();

    let err = h.auth.authenticate(&login.tokens.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthenticationFailed)));
}
