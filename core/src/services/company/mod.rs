//! Company registration and rating views

mod service;

#[cfg(test)]
mod tests;

pub use service::CompanyService;
