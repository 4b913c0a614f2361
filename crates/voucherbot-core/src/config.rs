use std::path::PathBuf;

use crate::app_config::{AppConfig, ConfigError};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, which keeps it
/// usable from tests or callers that manage env setup themselves.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup. Every variable has a default;
/// nothing is required.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_url = or_default("VOUCHERBOT_STORE_URL", "https://order.dominos.com.au");
    let log_level = or_default("VOUCHERBOT_LOG_LEVEL", "info");
    let results_path = PathBuf::from(or_default("VOUCHERBOT_RESULTS_PATH", "./results.txt"));
    let request_timeout_secs = parse_u64("VOUCHERBOT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VOUCHERBOT_USER_AGENT", "voucherbot/0.1 (voucher-research)");

    Ok(AppConfig {
        store_url,
        log_level,
        results_path,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.store_url, "https://order.dominos.com.au");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.results_path, PathBuf::from("./results.txt"));
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "voucherbot/0.1 (voucher-research)");
    }

    #[test]
    fn store_url_override() {
        let mut map = HashMap::new();
        map.insert("VOUCHERBOT_STORE_URL", "http://127.0.0.1:9999");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.store_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn results_path_override() {
        let mut map = HashMap::new();
        map.insert("VOUCHERBOT_RESULTS_PATH", "/tmp/out.txt");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.results_path, PathBuf::from("/tmp/out.txt"));
    }

    #[test]
    fn request_timeout_secs_override() {
        let mut map = HashMap::new();
        map.insert("VOUCHERBOT_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn request_timeout_secs_invalid() {
        let mut map = HashMap::new();
        map.insert("VOUCHERBOT_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VOUCHERBOT_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(VOUCHERBOT_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn user_agent_override() {
        let mut map = HashMap::new();
        map.insert("VOUCHERBOT_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.user_agent, "custom-agent/2.0");
    }
}
