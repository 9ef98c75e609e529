use reqwest::StatusCode;

use crate::errors::Error;

/// Reactive fallback: which response status makes the client refresh its
/// credential and resend the request once.
///
/// Disabled by default; the proactive expiry check is the primary mechanism.
///
/// The platform has historically answered requests made with an expired token
/// with `404 Not Found`, which is why [`ReauthPlan::not_found`] exists. That
/// status also means "no such resource", so enabling it costs a refresh on
/// every genuine 404. `401`/`403` would be the customary signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReauthPlan {
    trigger: Option<StatusCode>,
}

impl ReauthPlan {
    pub fn disabled() -> Self {
        Self { trigger: None }
    }

    pub fn on_status(status: StatusCode) -> Self {
        Self {
            trigger: Some(status),
        }
    }

    pub fn not_found() -> Self {
        Self::on_status(StatusCode::NOT_FOUND)
    }

    pub fn from_code(code: Option<u16>) -> Result<Self, Error> {
        match code {
            None => Ok(Self::disabled()),
            Some(code) => StatusCode::from_u16(code)
                .map(Self::on_status)
                .map_err(|_| Error::Config(format!("Invalid reauth status code {}", code))),
        }
    }

    pub fn trigger(&self) -> Option<StatusCode> {
        self.trigger
    }

    pub fn should_retry(&self, status: StatusCode) -> bool {
        self.trigger == Some(status)
    }
}
