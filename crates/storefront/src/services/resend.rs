//! Resend email relay for the contact form.

use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::ContactConfig;

/// Resend API endpoint.
const SEND_URL: &str = "https://api.resend.com/emails";

/// Errors from the Resend relay.
#[derive(Debug, Error)]
pub enum ResendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A contact form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub email: String,
    pub name: String,
    pub message: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: String,
}

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    from: String,
    to: String,
}

impl ResendClient {
    /// Create a new Resend client.
    #[must_use]
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.resend_api_key.expose_secret().to_string(),
            from: config.from.clone(),
            to: config.to.clone(),
        }
    }

    /// Relay a contact form submission to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Resend rejects it.
    pub async fn send_contact_message(
        &self,
        message: &ContactMessage,
    ) -> Result<(), ResendError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: [&self.to],
            subject: "New contact message!",
            text: render_contact_message(message),
        };

        let response = self
            .client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

fn render_contact_message(message: &ContactMessage) -> String {
    format!(
        "From: {name} <{email}>\n\n{body}",
        name = message.name,
        email = message.email,
        body = message.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_message_renders_sender_and_body() {
        let rendered = render_contact_message(&ContactMessage {
            email: "buyer@example.com".to_string(),
            name: "Ada".to_string(),
            message: "Where is my order?".to_string(),
        });
        assert_eq!(
            rendered,
            "From: Ada <buyer@example.com>\n\nWhere is my order?"
        );
    }

    #[test]
    fn resend_error_display() {
        let err = ResendError::Api {
            status: 422,
            message: "invalid from".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 422 - invalid from");
    }
}
