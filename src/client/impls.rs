use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::{
    MeliClient,
    broker::CredentialBroker,
    client::USER_AGENT,
    config::Config,
    errors::Error,
    exchange::{HttpTokenExchange, TokenExchange},
    request_context::RequestDispatchContext,
    retry::RetryOutcome,
    token::Credential,
    url::authorized_url,
};

impl MeliClient {
    /// Create a client for the configured application. It has no credential
    /// until [`MeliClient::authorize`] succeeds, and until then every request
    /// is sent anonymously.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_credential(config, Credential::anonymous())
    }

    /// Client for public endpoints of the production API.
    pub fn anonymous() -> Result<Self, Error> {
        Self::new(Config::anonymous())
    }

    /// Create a client and exchange `code` for a credential, using the
    /// configured redirect URI.
    pub async fn connect(config: Config, code: &str) -> Result<Self, Error> {
        let client = Self::new(config)?;
        client.authorize(code).await?;
        Ok(client)
    }

    /// Resume with a credential obtained earlier (e.g. deserialized from
    /// storage). It is refreshed on first use if already expired.
    pub fn with_credential(config: Config, credential: Credential) -> Result<Self, Error> {
        let http_client = build_http_client(&config)?;
        let exchange = Arc::new(HttpTokenExchange::new(http_client.clone()));
        Self::assemble(config, credential, http_client, exchange)
    }

    /// Like [`MeliClient::with_credential`], refreshing through `exchange`
    /// instead of the platform's token endpoint.
    pub fn with_exchange(
        config: Config,
        credential: Credential,
        exchange: Arc<dyn TokenExchange>,
    ) -> Result<Self, Error> {
        let http_client = build_http_client(&config)?;
        Self::assemble(config, credential, http_client, exchange)
    }

    fn assemble(
        config: Config,
        credential: Credential,
        http_client: Client,
        exchange: Arc<dyn TokenExchange>,
    ) -> Result<Self, Error> {
        let identity = config.identity()?;
        let reauth = config.reauth_plan()?;
        let broker = CredentialBroker::new(identity, credential, config.expiry_policy(), exchange);
        Ok(Self {
            context: RequestDispatchContext::build(http_client, broker, reauth),
        })
    }

    pub fn broker(&self) -> Arc<CredentialBroker> {
        self.context.broker()
    }

    pub async fn credential(&self) -> Credential {
        self.context.broker().credential().await
    }

    /// See [`CredentialBroker::authorization_url`].
    pub fn authorization_url(&self, auth_site_base: &str, callback: &str) -> String {
        self.context
            .broker()
            .authorization_url(auth_site_base, callback)
    }

    pub async fn authorize(&self, code: &str) -> Result<Credential, Error> {
        let broker = self.context.broker();
        let redirect_uri = broker.identity().redirect_uri().to_string();
        broker.authorize(code, &redirect_uri).await
    }

    pub async fn authorize_with(&self, code: &str, redirect_uri: &str) -> Result<Credential, Error> {
        self.context.broker().authorize(code, redirect_uri).await
    }

    pub async fn get(&self, path: &str) -> Result<Response, Error> {
        self.dispatch(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: impl Into<String>) -> Result<Response, Error> {
        self.dispatch(Method::POST, path, Some(body.into())).await
    }

    pub async fn put(&self, path: &str, body: impl Into<String>) -> Result<Response, Error> {
        self.dispatch(Method::PUT, path, Some(body.into())).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, Error> {
        self.dispatch(Method::DELETE, path, None).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, Error> {
        let body = serde_json::to_string(body)?;
        self.post(path, body).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, Error> {
        let body = serde_json::to_string(body)?;
        self.put(path, body).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, Error> {
        let broker = self.context.broker();
        let credential = broker.ensure_valid().await.map_err(|err| {
            error!("{} {} aborted, no usable credential: {}", method, path, err);
            err
        })?;

        let response = self
            .send(&method, path, &credential, body.as_deref())
            .await?;

        let first_status = response.status();
        if credential.is_anonymous() || !self.context.reauth().should_retry(first_status) {
            return Ok(response);
        }

        warn!(
            "{} {} returned {}; refreshing credential and retrying once",
            method, path, first_status
        );
        let start = Instant::now();
        drop(response);
        let refreshed = broker.force_refresh(&credential).await?;
        let retried = self
            .send(&method, path, &refreshed, body.as_deref())
            .await?;
        RetryOutcome {
            method,
            path: path.to_string(),
            first_status,
            final_status: retried.status(),
            total_delay: start.elapsed(),
        }
        .log();
        Ok(retried)
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        credential: &Credential,
        body: Option<&str>,
    ) -> Result<Response, Error> {
        let api_url = self.context.broker().identity().api_url().to_string();
        let url = authorized_url(&api_url, path, credential);

        let mut request = self.context.http_client().request(method.clone(), &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let resp = request.send().await.map_err(|err| {
            error!("{} {} failed: {}", method, path, err);
            Error::from(err)
        })?;
        debug!(
            "{} {} -> {} (anonymous={})",
            method,
            path,
            resp.status(),
            credential.is_anonymous()
        );
        Ok(resp)
    }
}

fn build_http_client(config: &Config) -> Result<Client, Error> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
