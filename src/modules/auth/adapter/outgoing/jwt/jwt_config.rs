use crate::shared::config::{ConfigError, ConfigSource};

/// HS256 needs at least 32 bytes of key material.
pub const MIN_SECRET_LEN: usize = 32;

pub const MAX_ACCESS_TTL_SECONDS: u64 = 86_400;
pub const MAX_REFRESH_TTL_SECONDS: u64 = 365 * 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub issuer: String,
    pub access_ttl_seconds: i64,  // Expiration in seconds
    pub refresh_ttl_seconds: i64, // Expiration in seconds
    pub leeway_seconds: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtConfig {
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let access_secret = source.required("JWT_SECRET")?;
        if access_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                "must be at least 32 characters long for HS256",
            ));
        }

        let refresh_secret = source.required("JWT_REFRESH_SECRET")?;
        if refresh_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::invalid(
                "JWT_REFRESH_SECRET",
                "must be at least 32 characters long for HS256",
            ));
        }
        if refresh_secret == access_secret {
            return Err(ConfigError::invalid(
                "JWT_REFRESH_SECRET",
                "must differ from JWT_SECRET",
            ));
        }

        let access_ttl_seconds =
            Self::ttl(source, "JWT_EXPIRATION", "15m", MAX_ACCESS_TTL_SECONDS)?;
        let refresh_ttl_seconds = Self::ttl(
            source,
            "JWT_REFRESH_EXPIRATION",
            "7d",
            MAX_REFRESH_TTL_SECONDS,
        )?;

        if refresh_ttl_seconds <= access_ttl_seconds {
            return Err(ConfigError::invalid(
                "JWT_REFRESH_EXPIRATION",
                "must be greater than JWT_EXPIRATION",
            ));
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            issuer: source.or_default("JWT_ISSUER", "storefront"),
            access_ttl_seconds,
            refresh_ttl_seconds,
            leeway_seconds: source.parsed("JWT_LEEWAY", 0u64)?,
        })
    }

    fn ttl(
        source: &impl ConfigSource,
        key: &'static str,
        default: &str,
        max_seconds: u64,
    ) -> Result<i64, ConfigError> {
        let seconds = source.duration(key, default)?.as_secs();
        if seconds == 0 {
            return Err(ConfigError::invalid(key, "must be a positive duration"));
        }
        if seconds > max_seconds {
            return Err(ConfigError::invalid(
                key,
                format!("must not exceed {} seconds", max_seconds),
            ));
        }
        i64::try_from(seconds).map_err(|_| ConfigError::invalid(key, "duration is too large"))
    }
}
