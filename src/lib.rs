//! Client SDK for the MercadoLibre marketplace REST API.
//!
//! [`MeliClient`] wraps GET/POST/PUT/DELETE so callers never build query
//! strings or refresh tokens themselves. Each request asks the shared
//! [`CredentialBroker`] for a usable credential; an expired one is refreshed
//! under the broker's lock, so concurrent callers trigger a single refresh.

pub mod broker;
mod client;
pub mod config;
pub mod errors;
pub mod exchange;
pub mod identity;
mod request_context;
pub mod retry;
pub mod site;
pub mod telemetry;
pub mod token;
pub mod types;
pub mod url;

pub use broker::CredentialBroker;
pub use client::{MeliClient, USER_AGENT};
pub use config::{Config, ConfigLocation, read_config};
pub use errors::Error;
pub use exchange::{HttpTokenExchange, TokenExchange};
pub use identity::{ClientIdentity, DEFAULT_API_URL};
pub use retry::ReauthPlan;
pub use site::Site;
pub use token::{Credential, ExpiryPolicy};
pub use types::TokenResponse;
pub use url::{UrlBuilder, authorized_url};
