use std::env;
use std::time::Duration;

use crate::services::control_plane::RetryPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub dataplane_id: Option<String>,
    pub port: u16,
    pub callback_max_attempts: u32,
    pub callback_backoff: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = RetryPolicy::default();

        Self {
            dataplane_id: env::var("DATAPLANE_ID").ok().filter(|s| !s.is_empty()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            callback_max_attempts: env::var("CALLBACK_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_attempts),
            callback_backoff: env::var("CALLBACK_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.initial_backoff),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.callback_max_attempts,
            initial_backoff: self.callback_backoff,
        }
    }
}
