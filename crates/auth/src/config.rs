use std::time::Duration;

use folio_core::auth::{generate_secret, AdminCredentials};

use crate::error::AuthError;

const DEFAULT_ADMIN_USER: &str = "admin";
const DEFAULT_ADMIN_PASS: &str = "admin";
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;
/// One year.
const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

/// Complete auth configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub credentials: AdminCredentials,
    /// HMAC key for session tokens.
    pub secret: Vec<u8>,
    pub session_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// True when `ADMIN_USER`/`ADMIN_PASS` fell back to the defaults.
    pub default_credentials: bool,
    /// True when `SESSION_SECRET` was unset and a random key was generated.
    pub ephemeral_secret: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("credentials", &self.credentials)
            .field("secret", &"[redacted]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ADMIN_USER`: Admin username (default: `admin`)
    /// - `ADMIN_PASS`: Admin password (default: `admin`)
    /// - `SESSION_SECRET`: Session signing key (default: random per process)
    /// - `SESSION_TTL_HOURS`: Session lifetime in hours (default: 24)
    /// - `COOKIE_SECURE`: Set the `Secure` cookie flag (default: true when
    ///   `FOLIO_ENV=production`, false otherwise)
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed, or
    /// if `SESSION_TTL_HOURS` is outside 1..=8760.
    pub fn from_env() -> Result<Self, AuthError> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        if config.default_credentials {
            tracing::warn!("ADMIN_USER/ADMIN_PASS not set, using default admin credentials");
        }
        if config.ephemeral_secret {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
        }

        Ok(config)
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = var("ADMIN_USER");
        let password = var("ADMIN_PASS");
        let default_credentials = username.is_none() || password.is_none();

        let (secret, ephemeral_secret) = match var("SESSION_SECRET") {
            Some(secret) => (secret.into_bytes(), false),
            None => (generate_secret(), true),
        };

        let session_ttl_hours = match var("SESSION_TTL_HOURS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|hours| (1..=MAX_SESSION_TTL_HOURS).contains(hours))
                .ok_or_else(|| {
                    AuthError::Config(format!(
                        "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got '{v}'"
                    ))
                })?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };
        let session_ttl_secs = session_ttl_hours
            .checked_mul(60 * 60)
            .ok_or_else(|| AuthError::Config("SESSION_TTL_HOURS is out of range".to_string()))?;

        let production = var("FOLIO_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));
        let cookie_secure = match var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AuthError::Config(format!("COOKIE_SECURE must be true or false, got '{v}'"))
            })?,
            None => production,
        };

        Ok(Self {
            credentials: AdminCredentials {
                username: username.unwrap_or_else(|| DEFAULT_ADMIN_USER.to_string()),
                password: password.unwrap_or_else(|| DEFAULT_ADMIN_PASS.to_string()),
            },
            secret,
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_name: "session".to_string(),
            cookie_secure,
            default_credentials,
            ephemeral_secret,
        })
    }

    /// Session TTL as a chrono duration, for claim checks.
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl.as_secs() as i64)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
