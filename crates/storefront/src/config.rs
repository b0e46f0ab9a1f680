//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//! - `SHOPIFY_WEBHOOK_SECRET` - Shared secret for webhook HMAC verification
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API token (newsletter signups)
//! - `DEFAULT_COUNTRY` - ISO country code for pricing context (default: US)
//! - `META_PIXEL_ID` - Meta pixel ID
//! - `META_CONVERSIONS_TOKEN` - Meta Conversions API access token
//! - `RESEND_API_KEY` - Resend API key (contact form relay)
//! - `CONTACT_EMAIL_FROM` - Sender address for contact relays
//! - `CONTACT_EMAIL_TO` - Recipient address for contact relays
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyConfig,
    /// Country code used for `@inContext` pricing when the session has no
    /// currency preference
    pub default_country: String,
    /// Meta Conversions API configuration
    pub meta: Option<MetaConfig>,
    /// Contact form relay configuration
    pub contact: Option<ContactConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify API configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Storefront API private access token (server-side only)
    pub storefront_private_token: SecretString,
    /// Shared secret used to sign webhook payloads
    pub webhook_secret: SecretString,
    /// Admin API token for REST endpoints (newsletter signups)
    pub admin_token: Option<SecretString>,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_private_token", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("admin_token", &self.admin_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Meta Conversions API configuration.
#[derive(Clone)]
pub struct MetaConfig {
    /// Meta pixel ID
    pub pixel_id: String,
    /// Conversions API access token
    pub access_token: SecretString,
}

impl std::fmt::Debug for MetaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaConfig")
            .field("pixel_id", &self.pixel_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Contact form relay configuration.
#[derive(Clone)]
pub struct ContactConfig {
    /// Resend API key
    pub resend_api_key: SecretString,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
}

impl std::fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactConfig")
            .field("resend_api_key", &"[REDACTED]")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let shopify = ShopifyConfig::from_env()?;
        let default_country = get_env_or_default("DEFAULT_COUNTRY", "US");
        let meta = MetaConfig::from_env()?;
        let contact = ContactConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            shopify,
            default_country,
            meta,
            contact,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            store: get_required_env("SHOPIFY_STORE")?,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", "2026-01"),
            storefront_private_token: get_validated_secret("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?,
            webhook_secret: get_validated_secret("SHOPIFY_WEBHOOK_SECRET")?,
            admin_token: get_optional_secret("SHOPIFY_ADMIN_TOKEN")?,
        })
    }
}

impl MetaConfig {
    /// Both the pixel id and the access token must be present; a partial
    /// configuration is treated as absent.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let pixel_id = get_optional_env("META_PIXEL_ID");
        let token = get_optional_secret("META_CONVERSIONS_TOKEN")?;
        match (pixel_id, token) {
            (Some(pixel_id), Some(access_token)) => Ok(Some(Self {
                pixel_id,
                access_token,
            })),
            _ => Ok(None),
        }
    }
}

impl ContactConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(resend_api_key) = get_optional_secret("RESEND_API_KEY")? else {
            return Ok(None);
        };
        Ok(Some(Self {
            resend_api_key,
            from: get_required_env("CONTACT_EMAIL_FROM")?,
            to: get_required_env("CONTACT_EMAIL_TO")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Load and validate an optional secret from environment.
fn get_optional_secret(key: &str) -> Result<Option<SecretString>, ConfigError> {
    match get_optional_env(key) {
        Some(value) => {
            validate_secret_strength(&value, key)?;
            Ok(Some(SecretString::from(value)))
        }
        None => Ok(None),
    }
}
