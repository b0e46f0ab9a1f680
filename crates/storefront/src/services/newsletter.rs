//! Newsletter signups via the Shopify Admin REST API.
//!
//! Creates a customer with marketing consent. Shopify reports an existing
//! customer as a uniqueness error, which is surfaced as a distinct variant
//! so the route can answer idempotently.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use thiserror::Error;

/// Errors from newsletter signups.
#[derive(Debug, Error)]
pub enum NewsletterError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The email is already subscribed.
    #[error("Email already subscribed")]
    AlreadySubscribed,

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Shopify Admin REST client for newsletter signups.
#[derive(Clone)]
pub struct NewsletterClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl NewsletterClient {
    /// Create a new newsletter client.
    #[must_use]
    pub fn new(store: &str, api_version: &str, admin_token: &SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("https://{store}/admin/api/{api_version}/customers.json"),
            access_token: admin_token.expose_secret().to_string(),
        }
    }

    /// Subscribe an email address to marketing.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubscribed` when the customer exists, or an API error
    /// for any other rejection.
    pub async fn subscribe(&self, email: &str) -> Result<(), NewsletterError> {
        let body = json!({
            "customer": {
                "email": email,
                "email_marketing_consent": {
                    "state": "subscribed",
                    "opt_in_level": "single_opt_in",
                },
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        if message.contains("has already been taken") {
            return Err(NewsletterError::AlreadySubscribed);
        }

        Err(NewsletterError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_store_and_api_version() {
        let client = NewsletterClient::new(
            "test.myshopify.com",
            "2026-01",
            &SecretString::from("shpat_test"),
        );
        assert_eq!(
            client.endpoint,
            "https://test.myshopify.com/admin/api/2026-01/customers.json"
        );
    }

    #[test]
    fn newsletter_error_display() {
        assert_eq!(
            NewsletterError::AlreadySubscribed.to_string(),
            "Email already subscribed"
        );
    }
}
