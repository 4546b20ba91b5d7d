//! Passwordless authentication flow: registration, passcode login, token refresh

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
