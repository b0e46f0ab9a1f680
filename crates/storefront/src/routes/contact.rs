//! Contact form route handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::newsletter::is_valid_email;
use crate::services::resend::ContactMessage;
use crate::state::AppState;

/// Contact form request body.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
    pub email: String,
    pub name: Option<String>,
    pub message: Option<String>,
}

/// Relay a contact form submission to the shop's inbox.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactBody>,
) -> Result<Json<serde_json::Value>> {
    let email = body.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".to_string(),
        ));
    }

    let client = state.contact().ok_or(AppError::NotConfigured("resend"))?;

    let message = ContactMessage {
        email,
        name: body.name.unwrap_or_default(),
        message: body.message.unwrap_or_default(),
    };

    client
        .send_contact_message(&message)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({ "message": "Successfully sent!" })))
}
