use std::env;
use thiserror::Error;
use tracing::info;
use shared::calendar::DEFAULT_UTC_OFFSET_HOURS;
use shared::Clock;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://days.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BEARER_TOKEN not set")]
    MissingBearerToken,
    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub bearer_token: String,
    pub database_url: String,
    pub twitter_api_url: String,
    pub utc_offset_hours: i8,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bearer_token", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("twitter_api_url", &self.twitter_api_url)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bearer_token = lookup("BEARER_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingBearerToken)?;

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            info!("DATABASE_URL not set, using default: {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.to_string()
        });

        let twitter_api_url = lookup("TWITTER_API_URL")
            .unwrap_or_else(|| twitter_client::DEFAULT_BASE_URL.to_string());

        let utc_offset_hours = match lookup("UTC_OFFSET_HOURS") {
            Some(raw) => raw.trim().parse::<i8>()
                .ok()
                .filter(|hours| (-23..=23).contains(hours))
                .ok_or(ConfigError::Invalid { key: "UTC_OFFSET_HOURS", value: raw })?,
            None => DEFAULT_UTC_OFFSET_HOURS,
        };

        Ok(Self { bearer_token, database_url, twitter_api_url, utc_offset_hours })
    }

    pub fn clock(&self) -> Result<Clock, ConfigError> {
        Clock::from_offset_hours(self.utc_offset_hours).map_err(|_| ConfigError::Invalid {
            key: "UTC_OFFSET_HOURS",
            value: self.utc_offset_hours.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_requires_bearer_token() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap_err(), ConfigError::MissingBearerToken);
        assert_eq!(
            Config::from_lookup(lookup(&[("BEARER_TOKEN", "  ")])).unwrap_err(),
            ConfigError::MissingBearerToken
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("BEARER_TOKEN", "abc")])).unwrap();
        assert_eq!(config.bearer_token, "abc");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.twitter_api_url, twitter_client::DEFAULT_BASE_URL);
        assert_eq!(config.utc_offset_hours, 9);
        assert!(config.clock().is_ok());
        assert!(!format!("{config:?}").contains("abc"));
    }

    #[test]
    fn test_rejects_bad_offset() {
        let err = Config::from_lookup(lookup(&[("BEARER_TOKEN", "abc"), ("UTC_OFFSET_HOURS", "nine")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "UTC_OFFSET_HOURS", .. }));

        let err = Config::from_lookup(lookup(&[("BEARER_TOKEN", "abc"), ("UTC_OFFSET_HOURS", "24")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
