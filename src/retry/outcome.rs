use std::time::Duration;

use reqwest::{Method, StatusCode};
use tracing::Level;
use tracing::event;

#[derive(Debug, Clone)]
pub struct RetryOutcome {
    pub method: Method,
    pub path: String,
    pub first_status: StatusCode,
    pub final_status: StatusCode,
    pub total_delay: Duration,
}

impl RetryOutcome {
    pub fn success(&self) -> bool {
        self.final_status.is_success()
    }

    pub fn log(&self) {
        event!(
            Level::INFO,
            method = %self.method,
            path = %self.path,
            first_status = self.first_status.as_u16(),
            final_status = self.final_status.as_u16(),
            success = self.success(),
            total_delay_ms = self.total_delay.as_millis() as u64,
            "retry.outcome"
        );
    }
}
