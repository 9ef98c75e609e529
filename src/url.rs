//! Query-string composition for API and OAuth URLs.
//!
//! Values are escaped with [`urlencoding::encode`], which keeps the RFC 3986
//! unreserved set and percent-encodes everything else. A space becomes `%20`,
//! never `+`.

use std::fmt;

use crate::token::Credential;

/// Accumulates a base URL and `key=value` query fragments.
#[derive(Clone, Debug)]
pub struct UrlBuilder {
    url: String,
}

impl UrlBuilder {
    pub fn build(base: impl Into<String>) -> Self {
        Self { url: base.into() }
    }

    /// Appends `key=<escaped value>`. The first parameter is introduced with
    /// `?`, later ones with `&`. A trailing `?` or `&` already present in the
    /// accumulated string is reused instead of doubled.
    ///
    /// `key` is written as-is; callers pass URL-safe keys.
    pub fn append(mut self, key: &str, raw_value: &str) -> Self {
        self.push(key, raw_value);
        self
    }

    pub fn push(&mut self, key: &str, raw_value: &str) {
        if !self.url.contains('?') {
            self.url.push('?');
        } else if !self.url.ends_with('?') && !self.url.ends_with('&') {
            self.url.push('&');
        }
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(&urlencoding::encode(raw_value));
    }

    pub fn render(&self) -> String {
        self.url.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Builds `api_url + path`, appending `access_token` unless the credential is
/// anonymous.
pub fn authorized_url(api_url: &str, path: &str, credential: &Credential) -> String {
    let mut url = UrlBuilder::build(format!("{api_url}{path}"));
    if !credential.is_anonymous() {
        url.push("access_token", credential.access_token());
    }
    url.render()
}
