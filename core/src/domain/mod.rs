//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{Company, Review, User};
pub use value_objects::{CompanySummary, ReviewDetails};
