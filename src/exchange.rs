//! `/oauth/token` grant calls.
//!
//! [`TokenExchange`] is the seam the broker refreshes through; tests swap in
//! their own implementation, production uses [`HttpTokenExchange`].

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use tracing::{debug, error, info};

use crate::errors::Error;
use crate::identity::ClientIdentity;
use crate::token::Credential;
use crate::types::TokenResponse;
use crate::url::UrlBuilder;

pub const AUTHORIZATION_CODE: &str = "authorization_code";
pub const REFRESH_TOKEN: &str = "refresh_token";

#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchanges an authorization code for a credential.
    async fn authorize(
        &self,
        identity: &ClientIdentity,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Credential, Error>;

    /// Exchanges `current`'s refresh token for a new credential.
    async fn refresh(
        &self,
        identity: &ClientIdentity,
        current: &Credential,
    ) -> Result<Credential, Error>;
}

pub struct HttpTokenExchange {
    http_client: Client,
}

impl HttpTokenExchange {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    async fn post_grant(&self, url: &UrlBuilder) -> Result<(StatusCode, String), Error> {
        let resp = self
            .http_client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body("")
            .send()
            .await
            .map_err(|err| {
                error!("token request failed: {}", err);
                Error::from(err)
            })?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn authorize(
        &self,
        identity: &ClientIdentity,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Credential, Error> {
        let url = UrlBuilder::build(identity.token_url())
            .append("grant_type", AUTHORIZATION_CODE)
            .append("client_id", &identity.app_id().to_string())
            .append("client_secret", identity.app_secret())
            .append("code", code)
            .append("redirect_uri", redirect_uri);

        let (status, body) = self.post_grant(&url).await?;
        if status != StatusCode::OK {
            error!(
                "authorization failed: status={} app_id={}",
                status,
                identity.app_id()
            );
            return Err(Error::Auth(
                "authorization failed, code may be expired".to_string(),
            ));
        }
        let credential = parse_credential(&body)?;
        info!(
            "authorization ok: token_len={} expires_in={}",
            credential.access_token().len(),
            credential.expires_in()
        );
        Ok(credential)
    }

    async fn refresh(
        &self,
        identity: &ClientIdentity,
        current: &Credential,
    ) -> Result<Credential, Error> {
        let url = UrlBuilder::build(identity.token_url())
            .append("grant_type", REFRESH_TOKEN)
            .append("client_id", &identity.app_id().to_string())
            .append("client_secret", identity.app_secret())
            .append("refresh_token", current.refresh_token());

        let (status, body) = self.post_grant(&url).await?;
        if status != StatusCode::OK {
            error!("refresh failed: status={}", status);
            return Err(Error::Auth(format!(
                "refresh failed: status {}",
                status.as_u16()
            )));
        }
        let credential = parse_credential(&body)?;
        debug!(
            "refresh ok: token_len={} expires_in={}",
            credential.access_token().len(),
            credential.expires_in()
        );
        Ok(credential)
    }
}

fn parse_credential(body: &str) -> Result<Credential, Error> {
    let response: TokenResponse = serde_json::from_str(body).map_err(|err| {
        error!("token response is not valid JSON: {} (len={})", err, body.len());
        Error::Encoding(err)
    })?;
    Ok(Credential::from_response(
        response,
        Timestamp::now().as_second(),
    ))
}
