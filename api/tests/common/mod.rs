//! Shared setup for the HTTP integration tests: an application wired over
//! the in-memory stores with the mock mailer.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, web};
use tg_api::AppState;
use tg_core::{NewCompany, NewUser};
use tg_infra::{cache::MemoryOtpStore, email::MockEmailSender, InfrastructureServices};
use tg_shared::AppConfig;
use uuid::Uuid;

pub struct TestContext {
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub mailer: Arc<MockEmailSender>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AppConfig::in_memory();
        let mailer = Arc::new(MockEmailSender::new());
        let infra =
            InfrastructureServices::in_memory(Arc::new(MemoryOtpStore::new()), mailer.clone());
        let state = AppState::new(&config, infra).expect("in-memory state builds");

        Self {
            config,
            state: web::Data::new(state),
            mailer,
        }
    }

    /// Register `email` and log it in, returning the user id and access token
    pub async fn signed_in(&self, email: &str) -> (Uuid, String) {
        let registration = self
            .state
            .auth
            .register(NewUser {
                email: email.to_string(),
                name: "Test User".to_string(),
                country: "NG".to_string(),
                language: "en".to_string(),
            })
            .await
            .expect("registration succeeds");
        let code = registration.otp.code.expect("code is echoed in tests");
        let login = self
            .state
            .auth
            .login(email, &code)
            .await
            .expect("login succeeds");
        (login.user.id, login.tokens.access_token)
    }

    pub async fn company(&self, name: &str, website: &str) -> Uuid {
        self.state
            .companies
            .register(NewCompany {
                company_name: name.to_string(),
                category: "Home Services".to_string(),
                subcategory: "Roofing".to_string(),
                country: "NG".to_string(),
                website: website.to_string(),
                ..Default::default()
            })
            .await
            .expect("company registers")
            .company
            .id
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
