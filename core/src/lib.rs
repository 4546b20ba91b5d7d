//! # TradeGuider Core
//!
//! Core business logic and domain layer for the TradeGuider backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, Company, NewCompany, NewReview, NewUser, OneTimeCode, OtpPurpose, ReactionKind,
    Review, ReviewChanges, ReviewReaction, TokenPair, TokenType, User, UserChanges,
};
pub use domain::value_objects::{
    CompanyReviews, CompanySummary, IssuedOtp, LoginResult, RatingSummary, Registration,
    ReviewAuthor, ReviewCompany, ReviewDetails, UserProfile,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    CompanyFilter, CompanyRepository, InMemoryStore, ReviewFilter, ReviewRepository,
    UserRepository,
};
pub use services::{
    AuthService, CompanyService, EmailMessage, NotificationSender, OtpService, OtpServiceConfig,
    OtpStore, ReviewService, TokenService, TokenServiceConfig, UserService,
};
