//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `tg_core`:
//! - **Database**: MySQL repositories using SQLx, with embedded migrations
//! - **Cache**: Redis (or in-process) storage for one-time passcodes
//! - **Email**: Plunk transactional email client and a recording mock
//!
//! [`initialize`] wires the implementations selected by [`AppConfig`].

use std::sync::Arc;

use tg_core::repositories::{CompanyRepository, InMemoryStore, ReviewRepository, UserRepository};
use tg_core::services::{NotificationSender, OtpStore};
use tg_shared::{AppConfig, StorageBackend};

/// Cache module - OTP storage backends
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - transactional email providers
pub mod email;

use database::{DatabasePool, MySqlCompanyRepository, MySqlReviewRepository, MySqlUserRepository};

/// Infrastructure service container handed to the application layer
#[derive(Clone)]
pub struct InfrastructureServices {
    pub users: Arc<dyn UserRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub otp_store: Arc<dyn OtpStore>,
    pub email_sender: Arc<dyn NotificationSender>,
    /// `None` when running on the in-memory store
    pub database: Option<DatabasePool>,
}

impl InfrastructureServices {
    /// Relational data kept in-process; the cache and sender are supplied
    pub fn in_memory(otp_store: Arc<dyn OtpStore>, email_sender: Arc<dyn NotificationSender>) -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            companies: Arc::new(store.clone()),
            reviews: Arc::new(store),
            otp_store,
            email_sender,
            database: None,
        }
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - the relational store (MySQL pool plus migrations, or in-memory)
/// - the OTP cache (Redis with connect retry, or in-memory)
/// - the email sender
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(
        storage = ?config.database.backend,
        cache = ?config.cache.backend,
        email = ?config.email.provider,
        "Initializing infrastructure services..."
    );

    let otp_store = cache::create_otp_store(&config.cache).await?;
    let email_sender = email::create_email_sender(&config.email)?;

    let services = match config.database.backend {
        StorageBackend::Memory => InfrastructureServices::in_memory(otp_store, email_sender),
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            InfrastructureServices {
                users: Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                companies: Arc::new(MySqlCompanyRepository::new(pool.get_pool().clone())),
                reviews: Arc::new(MySqlReviewRepository::new(pool.get_pool().clone())),
                otp_store,
                email_sender,
                database: Some(pool),
            }
        }
    };

    tracing::info!("Infrastructure services initialized successfully");
    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider rejected the request
    #[error("Email service error: {0}")]
    Email(String),
}
