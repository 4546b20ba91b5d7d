//! Input normalisation and validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Maximum length of an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Check email syntax.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Trim and lower-case an email address so it can be used as a lookup key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lower-case a category label and replace spaces with underscores,
/// e.g. `"Home Services"` becomes `"home_services"`.
pub fn normalize_slug(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Check if a string is blank after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Mask an email for log output: `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
