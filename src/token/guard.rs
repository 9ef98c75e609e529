use std::future::Future;

use jiff::Timestamp;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::errors::Error;
use crate::telemetry::refresh::{RefreshOutcome, RefreshTelemetry};

use super::{Credential, ExpiryPolicy};

/// Convenience result alias for guard operations.
pub type CredentialGuardResult<T> = Result<T, Error>;

/// Holds the current credential and serializes refreshes of it.
///
/// Readers that find a usable credential only take the read lock. Refreshes
/// run under `refresh_lock`, so at most one refresh call is in flight per
/// guard; callers queued behind it re-check and reuse its result.
pub struct CredentialGuard {
    credential: RwLock<Credential>,
    policy: ExpiryPolicy,
    refresh_lock: Mutex<()>,
}

impl CredentialGuard {
    pub fn new(credential: Credential, policy: ExpiryPolicy) -> Self {
        Self {
            credential: RwLock::new(credential),
            policy,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    pub async fn current(&self) -> Credential {
        self.credential.read().await.clone()
    }

    /// Stores a credential obtained outside the refresh path (e.g. from an
    /// authorization code). Waits for any in-flight refresh to finish first.
    pub async fn replace(&self, credential: Credential) {
        let _lock = self.refresh_lock.lock().await;
        *self.credential.write().await = credential;
    }

    /// Returns the held credential, refreshing it first if it is expired.
    /// Anonymous credentials are returned as-is.
    pub async fn ensure_valid<F, Fut>(
        &self,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> CredentialGuardResult<Credential>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = CredentialGuardResult<Credential>>,
    {
        {
            let held = self.credential.read().await;
            if !self.needs_refresh(&held) {
                return Ok(held.clone());
            }
        }

        // Only one refresh attempt should run at a time.
        let _lock = self.refresh_lock.lock().await;
        let stale = {
            let held = self.credential.read().await;
            if !self.needs_refresh(&held) {
                debug!("credential refreshed by a concurrent caller");
                telemetry.emit_success(
                    RefreshOutcome::Coalesced,
                    Timestamp::now(),
                    held.expires_in(),
                );
                return Ok(held.clone());
            }
            held.clone()
        };
        self.run_refresh(stale, refresh_cb, telemetry).await
    }

    /// Refreshes because the server rejected `rejected`. If the held
    /// credential no longer matches it, someone already refreshed and the
    /// held one is returned without another call.
    pub async fn force_refresh<F, Fut>(
        &self,
        rejected: &Credential,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> CredentialGuardResult<Credential>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = CredentialGuardResult<Credential>>,
    {
        let _lock = self.refresh_lock.lock().await;
        let stale = {
            let held = self.credential.read().await;
            if held.is_anonymous() {
                return Ok(held.clone());
            }
            if held.access_token() != rejected.access_token() {
                debug!("rejected credential already replaced");
                telemetry.emit_success(
                    RefreshOutcome::Coalesced,
                    Timestamp::now(),
                    held.expires_in(),
                );
                return Ok(held.clone());
            }
            held.clone()
        };
        self.run_refresh(stale, refresh_cb, telemetry).await
    }

    fn needs_refresh(&self, credential: &Credential) -> bool {
        !credential.is_anonymous()
            && self
                .policy
                .is_expired(credential, Timestamp::now().as_second())
    }

    // Caller must hold `refresh_lock`.
    async fn run_refresh<F, Fut>(
        &self,
        stale: Credential,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> CredentialGuardResult<Credential>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = CredentialGuardResult<Credential>>,
    {
        telemetry.emit_start(Timestamp::now(), stale.expires_at());
        match refresh_cb(stale).await {
            Ok(fresh) => {
                {
                    let mut writer = self.credential.write().await;
                    *writer = fresh.clone();
                }
                telemetry.emit_success(
                    RefreshOutcome::Refreshed,
                    Timestamp::now(),
                    fresh.expires_in(),
                );
                Ok(fresh)
            }
            Err(err) => {
                telemetry.emit_failure(&err, Timestamp::now());
                Err(err)
            }
        }
    }
}
