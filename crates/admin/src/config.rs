//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_BASE_URL` - Public URL of the app; printed QR codes point here
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2026-01)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";

/// Minimum Shannon entropy for a stored access token.
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Fragments that mark a value copied from docs rather than issued by Shopify.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "token-here",
    "xxx",
    "todo",
    "insert",
    "paste",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL, without a trailing slash. Printed QR codes point here.
    pub base_url: String,
    pub shopify: ShopifyAdminConfig,
    pub sentry: SentryConfig,
    /// Serve HTTPS directly when set
    pub tls: Option<TlsConfig>,
}

/// Shopify Admin API configuration.
///
/// Access tokens are per shop and live in the database, not here.
#[derive(Debug, Clone)]
pub struct ShopifyAdminConfig {
    /// Quarterly API version, e.g. `2026-01`
    pub api_version: String,
}

impl ShopifyAdminConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_version = env_or("SHOPIFY_API_VERSION", DEFAULT_API_VERSION);
        validate_api_version(&api_version)?;
        Ok(Self { api_version })
    }
}

/// Sentry error tracking. Disabled when `dsn` is unset.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    /// Fraction of errors sent (0.0 to 1.0)
    pub sample_rate: f32,
    /// Fraction of requests traced (0.0 to 1.0)
    pub traces_sample_rate: f32,
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: optional_env("SENTRY_DSN"),
            environment: optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate("SENTRY_SAMPLE_RATE")?,
            traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE")?,
        })
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 1.0,
        }
    }
}

/// PEM material for serving HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    pub cert_pem: String,
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        match (optional_env("ADMIN_TLS_CERT"), optional_env("ADMIN_TLS_KEY")) {
            (None, None) => Ok(None),
            (Some(cert_pem), Some(key)) => Ok(Some(Self {
                cert_pem,
                key_pem: SecretString::from(key),
            })),
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_CERT/ADMIN_TLS_KEY".to_string(),
                "set both or neither".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables, reading `.env` first
    /// if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: get_database_url("ADMIN_DATABASE_URL")?,
            host: parse_env("ADMIN_HOST", "127.0.0.1")?,
            port: parse_env("ADMIN_PORT", "3001")?,
            base_url: parse_base_url(&required_env("ADMIN_BASE_URL")?)?,
            shopify: ShopifyAdminConfig::from_env()?,
            sentry: SentryConfig::from_env()?,
            tls: TlsConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable with `FromStr`, using `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `0.0..=1.0`, defaulting to 1.0.
fn parse_rate(key: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(key, "1.0")?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ))
    }
}

/// Database URL from `primary_key`, falling back to `DATABASE_URL` (set by
/// Fly.io postgres attach).
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set.
pub fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    optional_env(primary_key)
        .or_else(|| optional_env("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Parse the public base URL, keeping only scheme, host, port and path.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("ADMIN_BASE_URL".to_string(), msg);

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// API versions are quarterly releases named `YYYY-MM`.
fn validate_api_version(version: &str) -> Result<(), ConfigError> {
    let valid = version.len() == 7
        && version
            .char_indices()
            .all(|(i, c)| if i == 4 { c == '-' } else { c.is_ascii_digit() });

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "SHOPIFY_API_VERSION".to_string(),
            format!("expected YYYY-MM, got '{version}'"),
        ))
    }
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    let counts = s.chars().fold(HashMap::<char, u32>::new(), |mut acc, c| {
        *acc.entry(c).or_default() += 1;
        acc
    });
    let total: u32 = counts.values().sum();
    if total == 0 {
        return 0.0;
    }

    counts
        .values()
        .map(|&count| {
            let p = f64::from(count) / f64::from(total);
            -p * p.log2()
        })
        .sum()
}

/// Reject secrets that look like placeholders or are too predictable.
///
/// Used for Shopify access tokens before they are stored.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming `source`.
pub fn validate_secret_strength(secret: &str, source: &str) -> Result<(), ConfigError> {
    let insecure = |reason: String| ConfigError::InsecureSecret(source.to_string(), reason);
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(insecure(format!("looks like a placeholder ('{pattern}')")));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(insecure(format!(
            "entropy {entropy:.2} bits/char is below {MIN_ENTROPY_BITS_PER_CHAR:.1}"
        )));
    }

    Ok(())
}
