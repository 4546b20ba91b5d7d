//! Shared application state handed to every handler through `web::Data`.

use std::sync::Arc;

use tg_core::{
    AuthService, CompanyService, DomainResult, OtpService, OtpServiceConfig, ReviewService,
    TokenService, TokenServiceConfig, UserService,
};
use tg_infra::{database::DatabasePool, InfrastructureServices};
use tg_shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub companies: Arc<CompanyService>,
    pub reviews: Arc<ReviewService>,
    /// Present when backed by MySQL; used by the health check
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Wire the services over the selected infrastructure
    pub fn new(config: &AppConfig, infra: InfrastructureServices) -> DomainResult<Self> {
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::try_from(
            &config.jwt,
        )?)?);
        let otp_service = Arc::new(OtpService::new(
            infra.otp_store,
            infra.email_sender,
            OtpServiceConfig::from(&config.otp),
        ));

        let auth = AuthService::new(infra.users.clone(), otp_service, token_service);
        let users = UserService::new(infra.users, infra.reviews.clone());
        let companies = CompanyService::new(infra.companies.clone(), infra.reviews.clone());
        let reviews = ReviewService::new(infra.reviews, infra.companies);

        Ok(Self {
            auth: Arc::new(auth),
            users: Arc::new(users),
            companies: Arc::new(companies),
            reviews: Arc::new(reviews),
            database: infra.database,
        })
    }
}
