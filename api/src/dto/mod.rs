//! Request and response bodies for the HTTP API.
//!
//! Request DTOs carry only client-writable fields and validate themselves with
//! `validator`; response DTOs are built from domain values.

pub mod auth;
pub mod common;
pub mod company;
pub mod review;
pub mod user;

pub use auth::*;
pub use common::*;
pub use company::*;
pub use review::*;
pub use user::*;
