//! Shopify webhook receiver.
//!
//! Shopify signs each delivery with HMAC-SHA256 over the raw request body,
//! base64-encoded in the `x-shopify-hmac-sha256` header. Verification must
//! run against the raw bytes before any JSON parsing.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result};
use crate::services::meta::PurchaseEvent;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Shopify order payload, as delivered by the `orders/create` topic.
///
/// Only the fields relayed to Meta are modeled; the rest of the payload is
/// ignored.
#[derive(Debug, Deserialize)]
struct ShopifyOrder {
    id: i64,
    #[serde(default = "default_total")]
    total_price: String,
    #[serde(default = "default_currency")]
    currency: String,
    line_items: Option<Vec<OrderLineItem>>,
    #[serde(default)]
    email: String,
    client_details: Option<ClientDetails>,
}

#[derive(Debug, Deserialize)]
struct OrderLineItem {
    product_id: Option<i64>,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ClientDetails {
    browser_ip: Option<String>,
}

fn default_total() -> String {
    "0".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Verify a webhook signature against the raw body.
///
/// The header carries a base64-encoded HMAC-SHA256 digest. Comparison is
/// constant-time via `Mac::verify_slice`.
fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = BASE64.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Handle a Shopify webhook delivery.
///
/// Rejects deliveries with a missing topic (400) or an invalid signature
/// (401). `orders/create` relays a Purchase event to Meta; other topics are
/// acknowledged and ignored. The response is always a 200 for valid
/// deliveries so Shopify does not retry.
#[instrument(skip(state, headers, body))]
pub async fn shopify(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let topic = headers
        .get("x-shopify-topic")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing x-shopify-topic header".to_string()))?
        .to_string();

    let signature = headers
        .get("x-shopify-hmac-sha256")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let secret = state.config().shopify.webhook_secret.expose_secret();
    if !verify_signature(secret, &body, signature) {
        warn!(topic = %topic, "Rejected webhook with invalid signature");
        return Err(AppError::Unauthorized(
            "Invalid webhook signature".to_string(),
        ));
    }

    info!(topic = %topic, "Received webhook");

    if topic == "orders/create" {
        let order: ShopifyOrder = serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid order payload: {e}")))?;
        handle_order_created(&state, order).await?;
    }

    Ok(Json(json!({ "message": "Webhook received!" })))
}

async fn handle_order_created(state: &AppState, order: ShopifyOrder) -> Result<()> {
    let Some(line_items) = order.line_items else {
        return Err(AppError::BadRequest(
            "Order payload missing line_items".to_string(),
        ));
    };

    let purchase = PurchaseEvent {
        order_id: order.id,
        total_price: order.total_price,
        currency: order.currency,
        content_ids: line_items.iter().filter_map(|item| item.product_id).collect(),
        content_names: line_items.into_iter().map(|item| item.title).collect(),
        customer_email: order.email,
        customer_ip: order.client_details.and_then(|d| d.browser_ip),
    };

    match state.meta() {
        Some(meta) => {
            if let Err(e) = meta.track_purchase(&purchase).await {
                // Still ack the webhook; Shopify retries are not useful here.
                tracing::error!(error = %e, order_id = purchase.order_id, "Failed to relay purchase to Meta");
            }
        }
        None => {
            info!(order_id = purchase.order_id, "Meta not configured, skipping purchase relay");
        }
    }

    Ok(())
}
