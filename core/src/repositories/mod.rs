//! Repository interfaces for persisted entities.
//!
//! Deletes cascade: removing a user or a company removes their reviews,
//! and removing a review removes its likes and flags. Every implementation
//! must honour this.

pub mod company;
pub mod memory;
pub mod review;
pub mod user;

pub use company::{CompanyFilter, CompanyRepository};
pub use memory::InMemoryStore;
pub use review::{ReviewFilter, ReviewRepository};
pub use user::UserRepository;
