//! Newsletter subscription route handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::newsletter::NewsletterError;
use crate::state::AppState;

/// Newsletter subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    pub email: String,
}

/// Subscribe an email to the newsletter.
///
/// An already-subscribed email answers the same as a fresh signup, so the
/// endpoint cannot be used to probe which addresses exist.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> Result<Json<serde_json::Value>> {
    let email = body.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".to_string(),
        ));
    }

    let client = state
        .newsletter()
        .ok_or(AppError::NotConfigured("newsletter"))?;

    match client.subscribe(&email).await {
        Ok(()) => {
            tracing::info!("Newsletter subscription successful");
        }
        Err(NewsletterError::AlreadySubscribed) => {
            tracing::info!("Email already subscribed - treating as success");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Newsletter subscription failed");
            return Err(AppError::Internal(e.to_string()));
        }
    }

    Ok(Json(json!({ "message": "Subscribed successfully!" })))
}

/// Basic email validation.
pub(crate) fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("a@b.c"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@domain")); // no TLD
        assert!(!is_valid_email("test"));
    }
}
