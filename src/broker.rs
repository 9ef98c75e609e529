use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::Error;
use crate::exchange::TokenExchange;
use crate::identity::ClientIdentity;
use crate::telemetry::refresh::RefreshTelemetry;
use crate::token::{Credential, CredentialGuard, ExpiryPolicy};
use crate::url::UrlBuilder;

/// Owns a client's identity and its current credential.
///
/// One broker exists per client identity and is shared by every clone of the
/// client, so its refresh lock coalesces refreshes across all of them.
pub struct CredentialBroker {
    identity: ClientIdentity,
    exchange: Arc<dyn TokenExchange>,
    guard: CredentialGuard,
}

impl CredentialBroker {
    pub fn new(
        identity: ClientIdentity,
        credential: Credential,
        policy: ExpiryPolicy,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        Self {
            identity,
            exchange,
            guard: CredentialGuard::new(credential, policy),
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Snapshot of the held credential.
    pub async fn credential(&self) -> Credential {
        self.guard.current().await
    }

    /// URL the user must visit to grant this application access. No network
    /// call is made.
    pub fn authorization_url(&self, auth_site_base: &str, callback: &str) -> String {
        UrlBuilder::build(format!("{auth_site_base}/authorization"))
            .append("response_type", "code")
            .append("client_id", &self.identity.app_id().to_string())
            .append("redirect_uri", callback)
            .render()
    }

    /// Exchanges an authorization code and stores the resulting credential.
    /// On failure the held credential is left as it was.
    pub async fn authorize(&self, code: &str, redirect_uri: &str) -> Result<Credential, Error> {
        let credential = self
            .exchange
            .authorize(&self.identity, code, redirect_uri)
            .await?;
        self.guard.replace(credential.clone()).await;
        info!(app_id = self.identity.app_id(), "credential authorized");
        Ok(credential)
    }

    /// Exchanges `current`'s refresh token for a new credential. The result
    /// is returned, not stored.
    pub async fn refresh(&self, current: &Credential) -> Result<Credential, Error> {
        if current.refresh_token().is_empty() {
            warn!("refresh requested for a credential without refresh token");
            return Err(Error::Auth(
                "refresh failed: credential has no refresh token".to_string(),
            ));
        }
        self.exchange.refresh(&self.identity, current).await
    }

    /// Returns a credential usable right now, refreshing the held one under
    /// the broker's lock when it is expired.
    pub async fn ensure_valid(&self) -> Result<Credential, Error> {
        let telemetry = RefreshTelemetry::new("broker.ensure_valid");
        self.guard
            .ensure_valid(|stale| async move { self.refresh(&stale).await }, &telemetry)
            .await
    }

    /// Refreshes after the platform rejected `rejected`, unless a concurrent
    /// caller already replaced it.
    pub async fn force_refresh(&self, rejected: &Credential) -> Result<Credential, Error> {
        let telemetry = RefreshTelemetry::new("broker.force_refresh");
        self.guard
            .force_refresh(
                rejected,
                |stale| async move { self.refresh(&stale).await },
                &telemetry,
            )
            .await
    }
}
