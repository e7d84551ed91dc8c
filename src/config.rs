use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use time::{macros::format_description, UtcOffset};

use crate::matching::DedupPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    /// Origin of the calendar UI, when it is served from elsewhere.
    pub cors_allowed_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub dedup_policy: DedupPolicy,
    /// Offset at which "today" is taken when computing the current week key.
    pub week_key_offset: UtcOffset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests can avoid touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        let db_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(val) => val.parse::<u32>().context("Failed to parse DATABASE_MAX_CONNECTIONS")?,
            None => 10,
        };
        let min_connections = match lookup("DATABASE_MIN_CONNECTIONS") {
            Some(val) => val.parse::<u32>().context("Failed to parse DATABASE_MIN_CONNECTIONS")?,
            None => 1,
        };

        let environment = lookup("APP_ENVIRONMENT")
            .map(|val| val.parse::<Environment>())
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();
        let app_name = lookup("APP_NAME").unwrap_or_else(|| "Mentor Match".to_string());
        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").filter(|origin| !origin.is_empty());

        let dedup_policy = lookup("MATCH_DEDUP_POLICY")
            .map(|val| val.parse::<DedupPolicy>())
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();
        let week_key_offset = match lookup("WEEK_KEY_UTC_OFFSET") {
            Some(val) => parse_utc_offset(&val)?,
            None => UtcOffset::UTC,
        };

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: db_url,
                max_connections,
                min_connections,
            },
            app: AppConfig {
                name: app_name,
                environment,
                cors_allowed_origin,
            },
            matching: MatchingConfig {
                dedup_policy,
                week_key_offset,
            },
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}

/// Parses offsets written as `+03:00` or `-05:30`.
pub fn parse_utc_offset(value: &str) -> Result<UtcOffset> {
    let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
    UtcOffset::parse(value.trim(), format)
        .with_context(|| format!("Failed to parse WEEK_KEY_UTC_OFFSET '{}'", value))
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
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
    fn test_defaults_with_only_database_url() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/mm")])).unwrap();

        assert_eq!(config.server_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.app.name, "Mentor Match");
        assert_eq!(config.app.environment, Environment::Development);
        assert_eq!(config.app.cors_allowed_origin, None);
        assert_eq!(config.matching.dedup_policy, DedupPolicy::FirstSeen);
        assert_eq!(config.matching.week_key_offset, UtcOffset::UTC);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_database_url_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/mm"),
            ("SERVER_PORT", "9090"),
            ("APP_ENVIRONMENT", "Production"),
            ("CORS_ALLOWED_ORIGIN", "https://calendar.example.com"),
            ("MATCH_DEDUP_POLICY", "preserve_partners"),
            ("WEEK_KEY_UTC_OFFSET", "+03:00"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert!(config.is_production());
        assert_eq!(config.app.cors_allowed_origin.as_deref(), Some("https://calendar.example.com"));
        assert_eq!(config.matching.dedup_policy, DedupPolicy::PreservePartners);
        assert_eq!(config.matching.week_key_offset, UtcOffset::from_hms(3, 0, 0).unwrap());
    }

    #[test]
    fn test_bad_values_are_reported() {
        for (key, value) in [
            ("SERVER_PORT", "eighty"),
            ("APP_ENVIRONMENT", "qa"),
            ("MATCH_DEDUP_POLICY", "random"),
            ("WEEK_KEY_UTC_OFFSET", "3"),
        ] {
            let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/mm"), (key, value)]));
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }

    #[test]
    fn test_parse_negative_offset() {
        assert_eq!(parse_utc_offset("-05:30").unwrap(), UtcOffset::from_hms(-5, -30, 0).unwrap());
    }
}
