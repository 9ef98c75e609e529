use std::time::Duration;

use super::Credential;

/// Default safety margin subtracted from a credential's lifetime.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Decides when a held credential must be refreshed before use.
#[derive(Clone, Copy, Debug)]
pub struct ExpiryPolicy {
    /// A credential is treated as expired this long before the server would
    /// reject it.
    pub clock_skew: Duration,
}

impl ExpiryPolicy {
    pub fn new(clock_skew: Duration) -> Self {
        Self { clock_skew }
    }

    /// `issued_at + expires_in <= now + skew`. The boundary counts as expired.
    pub fn is_expired(&self, credential: &Credential, now: i64) -> bool {
        let skew = i64::try_from(self.clock_skew.as_secs()).unwrap_or(i64::MAX);
        credential.expires_at() <= now.saturating_add(skew)
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_SKEW)
    }
}
