//! Reviews and their likes and flags

mod service;

#[cfg(test)]
mod tests;

pub use service::ReviewService;
