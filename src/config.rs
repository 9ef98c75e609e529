//! Client configuration from a file, the environment, or AWS Secrets Manager.

use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use serde::Deserialize;

use crate::errors::Error;
use crate::identity::ClientIdentity;
use crate::retry::ReauthPlan;
use crate::site::Site;
use crate::token::{DEFAULT_CLOCK_SKEW, ExpiryPolicy};

pub const ENV_APP_ID: &str = "MELI_APP_ID";
pub const ENV_APP_SECRET: &str = "MELI_APP_SECRET";
pub const ENV_REDIRECT_URI: &str = "MELI_REDIRECT_URI";
pub const ENV_API_URL: &str = "MELI_API_URL";
pub const ENV_SITE: &str = "MELI_SITE";
pub const ENV_CLOCK_SKEW_SECS: &str = "MELI_CLOCK_SKEW_SECS";
pub const ENV_REAUTH_STATUS: &str = "MELI_REAUTH_STATUS";
pub const ENV_CONFIG_SECRET_ARN: &str = "MELI_CONFIG_SECRET_ARN";

pub enum ConfigLocation {
    File(String),
    Env,
    Secret,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub app_id: i64,
    pub app_secret: String,
    pub redirect_uri: String,
    /// Overrides the production API endpoint.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Marketplace whose authorization host users are sent to.
    #[serde(default)]
    pub site: Option<Site>,
    #[serde(default)]
    pub clock_skew_secs: Option<u64>,
    /// Response status that triggers one refresh-and-retry. Unset disables it.
    #[serde(default)]
    pub reauth_status: Option<u16>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_values(
        app_id: i64,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        api_url: Option<String>,
        site: Option<Site>,
        clock_skew_secs: Option<u64>,
        reauth_status: Option<u16>,
    ) -> Self {
        Self {
            app_id,
            app_secret: app_secret.into(),
            redirect_uri: redirect_uri.into(),
            api_url,
            site,
            clock_skew_secs,
            reauth_status,
            request_timeout_secs: None,
        }
    }

    /// Configuration for public endpoints only; no application identity.
    pub fn anonymous() -> Self {
        Self::from_values(0, "", "", None, None, None, None)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a caller-supplied variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("Missing {} env var", key)))
        };
        let app_id = required(ENV_APP_ID)?
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::Config(format!("Invalid {}: {}", ENV_APP_ID, e)))?;
        let site = lookup(ENV_SITE).map(|s| s.parse::<Site>()).transpose()?;
        let clock_skew_secs = lookup(ENV_CLOCK_SKEW_SECS)
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|e| Error::Config(format!("Invalid {}: {}", ENV_CLOCK_SKEW_SECS, e)))
            })
            .transpose()?;
        let reauth_status = lookup(ENV_REAUTH_STATUS)
            .map(|s| {
                s.trim()
                    .parse::<u16>()
                    .map_err(|e| Error::Config(format!("Invalid {}: {}", ENV_REAUTH_STATUS, e)))
            })
            .transpose()?;
        Ok(Self::from_values(
            app_id,
            required(ENV_APP_SECRET)?,
            required(ENV_REDIRECT_URI)?,
            lookup(ENV_API_URL),
            site,
            clock_skew_secs,
            reauth_status,
        ))
    }

    /// Reads a JSON config stored in AWS Secrets Manager under the ARN named
    /// by `MELI_CONFIG_SECRET_ARN`.
    pub async fn from_secret() -> Result<Self, Error> {
        let secret_arn = std::env::var(ENV_CONFIG_SECRET_ARN)
            .map_err(|_| Error::Config(format!("Missing {} env var", ENV_CONFIG_SECRET_ARN)))?;
        let client = aws_sdk_secretsmanager::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        );
        let resp = client
            .get_secret_value()
            .secret_id(secret_arn)
            .send()
            .await
            .map_err(|e| Error::Config(format!("Failed to get secret: {}", e)))?;
        let secret = match resp.secret_string() {
            Some(s) => Ok(s),
            None => Err(Error::Config(
                "Failed to get secret string, returned None".to_string(),
            )),
        }?;
        serde_json::from_str(secret)
            .map_err(|e| Error::Config(format!("Invalid config secret: {}", e)))
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn identity(&self) -> Result<ClientIdentity, Error> {
        ClientIdentity::new(
            self.app_id,
            self.app_secret.clone(),
            self.redirect_uri.clone(),
            self.api_url.as_deref(),
        )
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::new(
            self.clock_skew_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CLOCK_SKEW),
        )
    }

    pub fn reauth_plan(&self) -> Result<ReauthPlan, Error> {
        ReauthPlan::from_code(self.reauth_status)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Authorization host of the configured site, if any.
    pub fn auth_url(&self) -> Option<&'static str> {
        self.site.map(|site| site.auth_url())
    }
}

pub async fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    let config = match loc {
        ConfigLocation::File(path) => Config::from_file(path)?,
        ConfigLocation::Env => Config::from_env()?,
        ConfigLocation::Secret => Config::from_secret().await?,
    };
    Ok(config)
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_url", &self.api_url)
            .field("site", &self.site)
            .field("clock_skew_secs", &self.clock_skew_secs)
            .field("reauth_status", &self.reauth_status)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
