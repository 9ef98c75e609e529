#![allow(dead_code)]

use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use mercadolibre_sdk::{Config, Credential};

pub const APP_ID: i64 = 123456;
pub const APP_SECRET: &str = "s3cr3t/+=";
pub const REDIRECT_URI: &str = "https://www.example.com/callback";

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn config(server_uri: &str) -> Config {
    Config::from_values(
        APP_ID,
        APP_SECRET,
        REDIRECT_URI,
        Some(server_uri.to_string()),
        None,
        None,
        None,
    )
}

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn credential_issued_at(access_token: &str, expires_in: i64, issued_at: i64) -> Credential {
    Credential::new(
        access_token,
        "bearer",
        "TG-refresh",
        "offline_access read write",
        expires_in,
        issued_at,
    )
}

pub fn fresh(access_token: &str) -> Credential {
    credential_issued_at(access_token, 21600, now())
}

/// `issued_at = now - expires_in - 1`
pub fn expired(access_token: &str) -> Credential {
    credential_issued_at(access_token, 21600, now() - 21600 - 1)
}

pub fn token_json(access_token: &str, refresh_token: &str) -> String {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 21600,
        "refresh_token": refresh_token,
        "scope": "offline_access read write"
    })
    .to_string()
}
