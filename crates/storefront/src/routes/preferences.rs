//! Buyer preference route handler.
//!
//! Stores country and locale choices in the session so catalog and cart
//! requests pick up the right `@inContext` pricing and message language.

use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use gemelli_core::Locale;

use crate::error::{AppError, Result};

/// Preferences request body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesBody {
    pub country: Option<String>,
    pub locale: Option<String>,
}

/// ISO 3166-1 alpha-2: exactly two ASCII uppercase letters.
fn is_valid_country(country: &str) -> bool {
    country.len() == 2 && country.bytes().all(|b| b.is_ascii_uppercase())
}

/// Update the buyer's country and locale preferences.
#[instrument(skip(session, body))]
pub async fn update(
    session: Session,
    Json(body): Json<PreferencesBody>,
) -> Result<Json<serde_json::Value>> {
    if let Some(country) = &body.country {
        if !is_valid_country(country) {
            return Err(AppError::BadRequest(format!(
                "Invalid country code: {country}"
            )));
        }
        crate::session::set_country(&session, country)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    if let Some(locale) = &body.locale {
        crate::session::set_locale(&session, Locale::parse(locale))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    Ok(Json(json!({ "message": "Preferences saved" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_must_be_two_uppercase_letters() {
        assert!(is_valid_country("US"));
        assert!(is_valid_country("ES"));

        assert!(!is_valid_country("us"));
        assert!(!is_valid_country("USA"));
        assert!(!is_valid_country("U"));
        assert!(!is_valid_country(""));
        assert!(!is_valid_country("1A"));
    }

    #[test]
    fn body_rejects_unknown_fields() {
        let result: std::result::Result<PreferencesBody, _> =
            serde_json::from_str(r#"{"country": "US", "currency": "USD"}"#);
        assert!(result.is_err());
    }
}
