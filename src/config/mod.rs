use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::ranking::candidates::DEFAULT_CANDIDATE_LIMIT;
use crate::ranking::service::DEFAULT_TOP_K;
use crate::utils::helpers::DEFAULT_SERVICE_NAME;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Which [`PostStore`](crate::post::post_store::PostStore) the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "inmemory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub max_pool_size: u32,
    pub candidate_limit: usize,
    pub top_k: usize,
    pub store_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            store_backend: StoreBackend::Mongo,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database_name: "post_leaderboard".to_string(),
            max_pool_size: 50,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            top_k: DEFAULT_TOP_K,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let candidate_limit = parse_or(&lookup, "CANDIDATE_LIMIT", defaults.candidate_limit)?;
        if candidate_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "CANDIDATE_LIMIT",
                value: "0".to_string(),
            });
        }

        let store_timeout_secs = parse_or(
            &lookup,
            "STORE_TIMEOUT_SECS",
            defaults.store_timeout.as_secs(),
        )?;
        if store_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            store_backend: parse_or(&lookup, "STORE_BACKEND", defaults.store_backend)?,
            mongodb_uri: lookup("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            database_name: lookup("DATABASE_NAME").unwrap_or(defaults.database_name),
            max_pool_size: parse_or(&lookup, "MONGO_MAX_POOL_SIZE", defaults.max_pool_size)?,
            candidate_limit,
            top_k: parse_or(&lookup, "TOP_K", defaults.top_k)?,
            store_timeout: Duration::from_secs(store_timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.candidate_limit, 25_000);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.max_pool_size, 50);
        assert_eq!(config.store_backend, StoreBackend::Mongo);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("CANDIDATE_LIMIT", "3"),
            ("TOP_K", "5"),
            ("STORE_BACKEND", "memory"),
            ("STORE_TIMEOUT_SECS", "1"),
            ("DATABASE_NAME", "bench"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.candidate_limit, 3);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.store_timeout, Duration::from_secs(1));
        assert_eq!(config.database_name, "bench");
    }

    #[test]
    fn unparsable_value_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("TOP_K", "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "TOP_K",
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn zero_candidate_limit_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("CANDIDATE_LIMIT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CANDIDATE_LIMIT", .. }));
    }

    #[test]
    fn zero_store_timeout_is_rejected() {
        let err =
            AppConfig::from_lookup(lookup_from(&[("STORE_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORE_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "postgres")])).is_err());
    }
}
