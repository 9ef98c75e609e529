use serde::{Deserialize, Serialize};

use crate::types::TokenResponse;

/// Access credential issued by `/oauth/token`, plus the local time it was
/// received.
///
/// A credential never changes after construction; a refresh yields a new one.
/// The serialized form carries `issued_at` so a credential can be persisted
/// and resumed later.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    access_token: String,
    token_type: String,
    refresh_token: String,
    scope: String,
    expires_in: i64,
    issued_at: i64,
}

impl Credential {
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        refresh_token: impl Into<String>,
        scope: impl Into<String>,
        expires_in: i64,
        issued_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            refresh_token: refresh_token.into(),
            scope: scope.into(),
            expires_in,
            issued_at,
        }
    }

    /// The "no authorization" credential used for public endpoints.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Stamps a token response with the local receive time. Any timing
    /// information in the response other than `expires_in` is ignored.
    pub fn from_response(response: TokenResponse, issued_at: i64) -> Self {
        let TokenResponse {
            access_token,
            token_type,
            expires_in,
            refresh_token,
            scope,
        } = response;
        Self {
            access_token,
            token_type,
            refresh_token,
            scope,
            expires_in,
            issued_at,
        }
    }

    pub fn to_response(&self) -> TokenResponse {
        TokenResponse {
            access_token: self.access_token.clone(),
            token_type: self.token_type.clone(),
            expires_in: self.expires_in,
            refresh_token: self.refresh_token.clone(),
            scope: self.scope.clone(),
        }
    }

    /// True when there is no access token to attach to a request.
    pub fn is_anonymous(&self) -> bool {
        self.access_token.is_empty()
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Epoch second at which the server stops accepting the access token.
    pub fn expires_at(&self) -> i64 {
        self.issued_at.saturating_add(self.expires_in)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token_len", &self.access_token.len())
            .field("token_type", &self.token_type)
            .field("has_refresh_token", &!self.refresh_token.is_empty())
            .field("scope", &self.scope)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
