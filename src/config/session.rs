use std::env;

/// Session timing configuration.
///
/// `store_ttl` bounds how long the store keeps an idle session (the
/// original cookie-age limit); `absolute_timeout` is the hard ceiling the
/// lifetime guard enforces from first authenticated use, deliberately
/// independent of store expiry.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub store_ttl_secs: u64,
    pub absolute_timeout_secs: i64,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            store_ttl_secs: env::var("SESSION_STORE_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            absolute_timeout_secs: env::var("SESSION_ABSOLUTE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7200), // 2 hours
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_ttl_secs: 3600,
            absolute_timeout_secs: 7200,
        }
    }
}
