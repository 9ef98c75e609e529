use crate::errors::Error;

/// Production endpoint of the marketplace REST API.
pub const DEFAULT_API_URL: &str = "https://api.mercadolibre.com";

/// Application identity registered with the platform. Immutable for the
/// lifetime of a client.
#[derive(Clone)]
pub struct ClientIdentity {
    app_id: i64,
    app_secret: String,
    redirect_uri: String,
    api_url: String,
}

impl ClientIdentity {
    pub fn new(
        app_id: i64,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self, Error> {
        let api_url = api_url
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        // Reject a bad base URL before any network call is attempted
        let _ = reqwest::Url::parse(&api_url)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", api_url, e)))?;
        Ok(Self {
            app_id,
            app_secret: app_secret.into(),
            redirect_uri: redirect_uri.into(),
            api_url,
        })
    }

    /// Identity for public, unauthenticated endpoints only.
    pub fn anonymous() -> Self {
        Self {
            app_id: 0,
            app_secret: String::new(),
            redirect_uri: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn app_id(&self) -> i64 {
        self.app_id
    }

    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.api_url)
    }
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("api_url", &self.api_url)
            .finish()
    }
}
