//! Domain entities representing core business objects.

pub mod company;
pub mod otp;
pub mod review;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use company::{Company, NewCompany};
pub use otp::{OneTimeCode, OtpPurpose, CODE_LENGTH, DEFAULT_TTL_SECONDS};
pub use review::{
    NewReview, ReactionKind, Review, ReviewChanges, ReviewReaction, MAX_RATING, MIN_RATING,
};
pub use token::{Claims, TokenPair, TokenType};
pub use user::{NewUser, User, UserChanges};
