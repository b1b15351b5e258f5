use std::env;
use std::time::Duration;

use crate::auth::adapter::outgoing::jwt::JwtConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Reads one configuration key. Blank values count as unset.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(key, e.to_string())),
            None => Ok(default),
        }
    }

    /// Accepts plain seconds ("900") or a humantime span ("15m", "7d").
    fn duration(&self, key: &'static str, default: &str) -> Result<Duration, ConfigError> {
        let raw = self.or_default(key, default);
        parse_duration(&raw).map_err(|reason| ConfigError::invalid(key, reason))
    }
}

/// Process environment, after dotenv files have been applied.
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl<F> ConfigSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key).filter(|v| !v.trim().is_empty())
    }
}

pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }
    humantime::parse_duration(raw).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let url = source.required("DATABASE_URL")?;
        let max_connections = source.parsed("DB_MAX_CONNECTIONS", 50u32)?;
        let min_connections = source.parsed("DB_MIN_CONNECTIONS", 5u32)?;

        if min_connections > max_connections {
            return Err(ConfigError::invalid(
                "DB_MIN_CONNECTIONS",
                "must not exceed DB_MAX_CONNECTIONS",
            ));
        }

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout: source.duration("DB_CONNECT_TIMEOUT", "5s")?,
            idle_timeout: source.duration("DB_IDLE_TIMEOUT", "300s")?,
            max_lifetime: source.duration("DB_MAX_LIFETIME", "1800s")?,
            run_migrations: source.parsed("RUN_MIGRATIONS", true)?,
        })
    }
}

/// Everything the server needs before it binds.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and reads the environment.
    #[cfg(not(tarpaulin_include))]
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = format!(".env.{}", environment);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::load(&EnvSource)
    }

    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let bcrypt_cost = source.parsed("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
        }

        let log_format = match source.or_default("LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::invalid(
                    "LOG_FORMAT",
                    format!("expected 'pretty' or 'json', got '{}'", other),
                ))
            }
        };

        let api_version = source.or_default("API_VERSION", "v1");
        if api_version.contains('/') {
            return Err(ConfigError::invalid("API_VERSION", "must be a single path segment"));
        }

        Ok(Self {
            environment: source.or_default("RUST_ENV", "development"),
            host: source.or_default("HOST", "127.0.0.1"),
            port: source.parsed("PORT", 8080u16)?,
            api_version,
            database: DatabaseConfig::load(source)?,
            jwt: JwtConfig::load(source)?,
            bcrypt_cost,
            log_format,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }
}
