use std::path::PathBuf;

use thiserror::Error;

/// Application configuration, resolved from the environment once at startup.
///
/// Every knob has a default that targets the production store; integration
/// tests and local experiments override `VOUCHERBOT_STORE_URL` to point the
/// client at a mock server instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote ordering site.
    pub store_url: String,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_level: String,
    /// File the CLI appends voucher test results to.
    pub results_path: PathBuf,
    /// Total per-request timeout applied to every HTTP call.
    pub request_timeout_secs: u64,
    /// User agent presented on every request.
    pub user_agent: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
