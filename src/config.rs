use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Process-wide settings, read once at startup and passed explicitly to
/// whatever needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_statement_timeout: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", 10u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            db_statement_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DB_STATEMENT_TIMEOUT_MS",
                5000,
            )?),
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
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
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.db_statement_timeout, Duration::from_millis(5000));
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("BCRYPT_COST", "12"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_missing_secret_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SERVER_PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "s3cret"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BCRYPT_COST", .. }));
    }
}
