use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mercadolibre_sdk::Credential;
use mercadolibre_sdk::telemetry::refresh::RefreshTelemetry;
use mercadolibre_sdk::token::{CredentialGuard, ExpiryPolicy};

use crate::common;

fn guard(credential: Credential) -> CredentialGuard {
    CredentialGuard::new(credential, ExpiryPolicy::new(Duration::from_secs(60)))
}

#[tokio::test(flavor = "current_thread")]
async fn fresh_credential_is_served_without_refresh() {
    let guard = guard(common::fresh("initial"));
    let refresh_called = Arc::new(AtomicUsize::new(0));
    let telemetry = RefreshTelemetry::new("contract.guard.ensure.fresh");

    let credential = guard
        .ensure_valid(
            {
                let called = refresh_called.clone();
                move |_stale| async move {
                    called.fetch_add(1, Ordering::SeqCst);
                    Ok(common::fresh("refreshed"))
                }
            },
            &telemetry,
        )
        .await
        .expect("should succeed");

    assert_eq!(credential.access_token(), "initial");
    assert_eq!(refresh_called.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn credential_inside_skew_window_is_refreshed() {
    // 30 seconds left, below the 60 second margin
    let guard = guard(common::credential_issued_at("stale", 3600, common::now() + 30 - 3600));
    let telemetry = RefreshTelemetry::new("contract.guard.ensure.refresh");

    let credential = guard
        .ensure_valid(
            |stale| async move {
                assert_eq!(stale.access_token(), "stale");
                Ok(common::fresh("refreshed"))
            },
            &telemetry,
        )
        .await
        .expect("refresh succeeds");
    assert_eq!(credential.access_token(), "refreshed");
    assert_eq!(guard.current().await.access_token(), "refreshed");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_refresh_keeps_stale_credential() {
    let guard = guard(common::expired("stale"));
    let telemetry = RefreshTelemetry::new("contract.guard.ensure.failure");

    let err = guard
        .ensure_valid(
            |_stale| async {
                Err(mercadolibre_sdk::Error::Auth(
                    "refresh failed: status 400".into(),
                ))
            },
            &telemetry,
        )
        .await
        .expect_err("should error");

    match err {
        mercadolibre_sdk::Error::Auth(msg) => assert!(msg.contains("400")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(guard.current().await.access_token(), "stale");
}

#[tokio::test(flavor = "current_thread")]
async fn replace_swaps_credential() {
    let guard = guard(Credential::anonymous());
    guard.replace(common::fresh("authorized")).await;
    assert_eq!(guard.current().await.access_token(), "authorized");
}
