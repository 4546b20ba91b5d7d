//! One-time passcodes used for passwordless login.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Number of digits in a passcode
pub const CODE_LENGTH: usize = 4;

/// Lifetime of a pending passcode (15 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 900;

/// Why a passcode was issued; selects the email wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Registration,
    Login,
}

/// A numeric passcode, leading zeros allowed
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Draws every digit independently from the OS CSPRNG
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let code = (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Wraps a code read back from the cache
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Exact comparison that takes the same time wherever the codes differ
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.len() == candidate.len() && constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }

    /// Cheap shape check run before touching the cache
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() == CODE_LENGTH && candidate.bytes().all(|b| b.is_ascii_digit())
    }
}

// Keep codes out of logs
impl std::fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OneTimeCode(****)")
    }
}

/// Cache key of the pending code for an email
pub fn code_key(email: &str) -> String {
    format!("otp:{}", email)
}

/// Cache key of the failed-attempt counter for an email
pub fn attempts_key(email: &str) -> String {
    format!("otp_attempts:{}", email)
}
