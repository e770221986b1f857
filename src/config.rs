/*
 * Responsibility
 * - Load settings from environment variables (PORT, APP_ENV, CORS, limits)
 * - Validate values (fail at startup instead of at request time)
 * - The security header table is NOT configurable; see middleware::security_headers
 */
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; present but unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        // Wildcards belong to development mode; the allow-list is exact-match only.
        if cors_allowed_origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGINS"));
        }

        let request_body_limit_bytes =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_body_limit_bytes,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("defaults should be valid");

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn app_env_accepts_short_and_mixed_case_forms() {
        assert_eq!(AppEnv::parse(Some("prod")), AppEnv::Production);
        assert_eq!(AppEnv::parse(Some("Production")), AppEnv::Production);
        assert_eq!(AppEnv::parse(Some("staging")), AppEnv::Development);
        assert_eq!(AppEnv::parse(None), AppEnv::Development);
    }

    #[test]
    fn cors_origins_are_trimmed_and_blank_entries_dropped() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            " https://a.example , ,https://b.example,",
        )])
        .expect("config should load");

        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn wildcard_cors_origin_is_rejected() {
        assert_eq!(
            config_from(&[("APP_ENV", "production"), ("CORS_ALLOWED_ORIGINS", "*")]).unwrap_err(),
            ConfigError::Invalid("CORS_ALLOWED_ORIGINS")
        );
        assert_eq!(
            config_from(&[("CORS_ALLOWED_ORIGINS", "https://a.example, *")]).unwrap_err(),
            ConfigError::Invalid("CORS_ALLOWED_ORIGINS")
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("REQUEST_BODY_LIMIT_BYTES", "2048"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .expect("config should load");

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.request_body_limit_bytes, 2048);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unparsable_values_are_rejected() {
        assert_eq!(
            config_from(&[("PORT", "eighty")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            config_from(&[("REQUEST_BODY_LIMIT_BYTES", "-1")]).unwrap_err(),
            ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES")
        );
        assert_eq!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "0")]).unwrap_err(),
            ConfigError::Invalid("REQUEST_TIMEOUT_SECS")
        );
    }
}
