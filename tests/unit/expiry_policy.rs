use std::time::Duration;

use mercadolibre_sdk::{Credential, ExpiryPolicy};

fn credential(expires_in: i64, issued_at: i64) -> Credential {
    Credential::new("a", "bearer", "r", "", expires_in, issued_at)
}

#[test]
fn default_skew_is_sixty_seconds() {
    assert_eq!(ExpiryPolicy::default().clock_skew, Duration::from_secs(60));
}

#[test]
fn boundary_counts_as_expired() {
    let policy = ExpiryPolicy::default();
    let now = 1_000_000;
    // issued_at + expires_in == now + skew
    assert!(policy.is_expired(&credential(3600, now + 60 - 3600), now));
    // one second more remains usable
    assert!(!policy.is_expired(&credential(3600, now + 61 - 3600), now));
}

#[test]
fn skew_refreshes_before_server_expiry() {
    let policy = ExpiryPolicy::default();
    let now = 1_000_000;
    // 30 seconds left on the server is already inside the safety margin
    assert!(policy.is_expired(&credential(3600, now + 30 - 3600), now));
}

#[test]
fn zero_skew_uses_exact_expiry() {
    let policy = ExpiryPolicy::new(Duration::ZERO);
    let now = 1_000_000;
    assert!(policy.is_expired(&credential(3600, now - 3600), now));
    assert!(!policy.is_expired(&credential(3600, now - 3599), now));
}

#[test]
fn long_expired_credential_is_expired() {
    let policy = ExpiryPolicy::default();
    let now = 1_000_000;
    assert!(policy.is_expired(&credential(21600, now - 21600 - 1), now));
}
