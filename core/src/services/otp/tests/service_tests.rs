use std::sync::Arc;

use super::mocks::{MockOtpStore, MockSender};
use crate::domain::entities::OtpPurpose;
use crate::errors::{AuthError, DomainError};
use crate::services::otp::{render_email, OtpService, OtpServiceConfig};

const EMAIL: &str = "a@x.com";

fn service_with(
    store: Arc<MockOtpStore>,
    sender: Arc<MockSender>,
    config: OtpServiceConfig,
) -> OtpService {
    OtpService::new(store, sender, config)
}

fn setup() -> (OtpService, Arc<MockOtpStore>, Arc<MockSender>) {
    let store = Arc::new(MockOtpStore::default());
    let sender = Arc::new(MockSender::default());
    let service = service_with(store.clone(), sender.clone(), OtpServiceConfig::default());
    (service, store, sender)
}

fn is_invalid_credential(err: &DomainError) -> bool {
    matches!(err, DomainError::Auth(AuthError::InvalidCredential))
}

#[tokio::test]
async fn test_issue_caches_and_emails_code() {
    let (service, store, sender) = setup();

    let issued = service.issue(EMAIL, OtpPurpose::Login).await.unwrap();
    assert_eq!(issued.expires_in, 900);
    assert!(issued.code.is_none(), "code must not be echoed by default");

    let cached = store.value("otp:a@x.com").expect("code cached");
    assert_eq!(cached.len(), 4);

    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert!(sent[0].subject.contains(&cached));
    assert!(sent[0].subject.contains("login"));
}

#[tokio::test]
async fn test_issue_echoes_code_when_enabled() {
    let store = Arc::new(MockOtpStore::default());
    let config = OtpServiceConfig {
        expose_code: true,
        ..Default::default()
    };
    let service = service_with(store.clone(), Arc::new(MockSender::default()), config);

    let issued = service.issue(EMAIL, OtpPurpose::Registration).await.unwrap();
    assert_eq!(issued.code, store.value("otp:a@x.com"));
}

#[tokio::test]
async fn test_reissue_overwrites_pending_code() {
    let (service, store, _) = setup();
    store.put("otp:a@x.com", "0000");
    service.issue(EMAIL, OtpPurpose::Login).await.unwrap();
    service.issue(EMAIL, OtpPurpose::Login).await.unwrap();

    // only the latest code is accepted
    let latest = store.value("otp:a@x.com").unwrap();
    service.redeem(EMAIL, &latest).await.unwrap();
}

#[tokio::test]
async fn test_email_failure_is_swallowed() {
    let store = Arc::new(MockOtpStore::default());
    let sender = Arc::new(MockSender {
        fail: true,
        ..Default::default()
    });
    let service = service_with(store.clone(), sender, OtpServiceConfig::default());

    assert!(service.issue(EMAIL, OtpPurpose::Registration).await.is_ok());
    assert!(store.value("otp:a@x.com").is_some());
}

#[tokio::test]
async fn test_cache_failure_is_internal_error() {
    let store = Arc::new(MockOtpStore {
        fail_writes: true,
        ..Default::default()
    });
    let service = service_with(store, Arc::new(MockSender::default()), OtpServiceConfig::default());

    let err = service.issue(EMAIL, OtpPurpose::Login).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}

#[tokio::test]
async fn test_redeem_succeeds_once() {
    let (service, store, _) = setup();
    service.issue(EMAIL, OtpPurpose::Login).await.unwrap();
    let code = store.value("otp:a@x.com").unwrap();

    service.redeem(EMAIL, &code).await.unwrap();
    assert!(store.value("otp:a@x.com").is_none());

    let err = service.redeem(EMAIL, &code).await.unwrap_err();
    assert!(is_invalid_credential(&err));
}

#[tokio::test]
async fn test_redeem_fails_when_code_taken_concurrently() {
    let store = Arc::new(MockOtpStore {
        lose_take_race: true,
        ..Default::default()
    });
    let service = service_with(store.clone(), Arc::new(MockSender::default()), OtpServiceConfig::default());
    store.put("otp:a@x.com", "1234");

    let err = service.redeem(EMAIL, "1234").await.unwrap_err();
    assert!(is_invalid_credential(&err));
    assert!(store.value("otp_attempts:a@x.com").is_none());
}

#[tokio::test]
async fn test_failures_are_indistinguishable() {
    let (service, store, _) = setup();

    // never issued
    let never = service.redeem(EMAIL, "1234").await.unwrap_err();

    // wrong code
    store.put("otp:a@x.com", "1234");
    let wrong = service.redeem(EMAIL, "4321").await.unwrap_err();

    // expired
    store.expire("otp:a@x.com");
    let expired = service.redeem(EMAIL, "1234").await.unwrap_err();

    for err in [&never, &wrong, &expired] {
        assert!(is_invalid_credential(err));
        assert_eq!(err.to_string(), "invalid otp");
    }
}

#[tokio::test]
async fn test_malformed_code_rejected_without_touching_store() {
    let (service, store, _) = setup();
    store.put("otp:a@x.com", "1234");

    for candidate in ["12345", "12a4", ""] {
        let err = service.redeem(EMAIL, candidate).await.unwrap_err();
        assert!(is_invalid_credential(&err));
    }
    assert_eq!(store.value("otp:a@x.com").as_deref(), Some("1234"));
    assert!(store.value("otp_attempts:a@x.com").is_none());
}

#[tokio::test]
async fn test_attempt_limit_drops_code() {
    let (service, store, _) = setup();
    store.put("otp:a@x.com", "1234");

    for _ in 0..5 {
        assert!(service.redeem(EMAIL, "9999").await.is_err());
    }
    assert!(store.value("otp:a@x.com").is_none());

    // even the right code is rejected now
    let err = service.redeem(EMAIL, "1234").await.unwrap_err();
    assert!(is_invalid_credential(&err));
}

#[tokio::test]
async fn test_unlimited_attempts_when_disabled() {
    let store = Arc::new(MockOtpStore::default());
    let config = OtpServiceConfig {
        max_attempts: None,
        ..Default::default()
    };
    let service = service_with(store.clone(), Arc::new(MockSender::default()), config);
    store.put("otp:a@x.com", "1234");

    for _ in 0..20 {
        assert!(service.redeem(EMAIL, "0000").await.is_err());
    }
    service.redeem(EMAIL, "1234").await.unwrap();
}

#[tokio::test]
async fn test_new_code_resets_attempts() {
    let (service, store, _) = setup();
    store.put("otp:a@x.com", "1234");
    for _ in 0..4 {
        let _ = service.redeem(EMAIL, "9999").await;
    }
    service.issue(EMAIL, OtpPurpose::Login).await.unwrap();
    assert!(store.value("otp_attempts:a@x.com").is_none());
}

#[test]
fn test_email_templates_differ_by_purpose() {
    let registration = render_email(EMAIL, OtpPurpose::Registration, "0420", 900);
    let login = render_email(EMAIL, OtpPurpose::Login, "0420", 900);

    assert_eq!(registration.subject, "Use code 0420 to set up your TradeGuider account");
    assert_eq!(login.subject, "Use code 0420 to login to your TradeGuider account");
    assert!(registration.html_body.contains("0420"));
    assert!(registration.html_body.contains("15 minutes"));
    assert_ne!(registration.html_body, login.html_body);
}
