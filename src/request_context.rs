use std::sync::Arc;

use reqwest::Client;

use crate::broker::CredentialBroker;
use crate::retry::ReauthPlan;

/// Shared context for outbound requests ensuring consistent credential and
/// retry handling across client clones.
#[derive(Clone)]
pub struct RequestDispatchContext {
    http_client: Client,
    broker: Arc<CredentialBroker>,
    reauth: ReauthPlan,
}

impl RequestDispatchContext {
    pub fn build(http_client: Client, broker: CredentialBroker, reauth: ReauthPlan) -> Self {
        Self {
            http_client,
            broker: Arc::new(broker),
            reauth,
        }
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn broker(&self) -> Arc<CredentialBroker> {
        Arc::clone(&self.broker)
    }

    pub fn reauth(&self) -> ReauthPlan {
        self.reauth
    }
}
