use std::env;

use crate::modules::auth::lockout::DEFAULT_LOCKOUT_THRESHOLD;

/// Account security configuration.
#[derive(Clone, Copy, Debug)]
pub struct SecurityConfig {
    /// Cumulative failed logins (since last success) that lock an account.
    pub lockout_threshold: i32,
}

impl SecurityConfig {
    pub fn from_env() -> Self {
        Self {
            lockout_threshold: env::var("LOCKOUT_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LOCKOUT_THRESHOLD),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            lockout_threshold: DEFAULT_LOCKOUT_THRESHOLD,
        }
    }
}
