//! Meta Conversions API client.
//!
//! Relays server-side events (purchases from Shopify webhooks, add-to-cart
//! from cart actions) to Meta. Delivery is best-effort: failures are logged
//! and never bubble into the request that triggered them.

use secrecy::ExposeSecret;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use gemelli_core::{AddToCartEvent, AnalyticsSink};

use crate::config::MetaConfig;

/// Conversions API version.
const API_VERSION: &str = "v18.0";

/// A purchase parsed out of an `orders/create` webhook.
#[derive(Debug, Clone)]
pub struct PurchaseEvent {
    pub order_id: i64,
    pub total_price: String,
    pub currency: String,
    pub content_ids: Vec<i64>,
    pub content_names: Vec<String>,
    pub customer_email: String,
    pub customer_ip: Option<String>,
}

/// Meta Conversions API client.
#[derive(Clone)]
pub struct MetaClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    source_url: String,
}

/// Email identifier list for Meta: hashed when present, empty otherwise.
fn hashed_email(email: &str) -> Vec<String> {
    if email.is_empty() {
        vec![]
    } else {
        vec![sha256_hex(email)]
    }
}

/// SHA-256 hex digest, the hashing Meta requires for user identifiers.
fn sha256_hex(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[derive(Serialize)]
struct EventsPayload {
    data: Vec<Event>,
    access_token: String,
}

#[derive(Serialize)]
struct Event {
    event_name: &'static str,
    event_time: i64,
    action_source: &'static str,
    event_source_url: String,
    user_data: UserData,
    custom_data: CustomData,
}

#[derive(Serialize)]
struct UserData {
    em: Vec<String>,
    client_ip_address: String,
}

#[derive(Serialize)]
struct CustomData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    content_name: String,
    content_type: &'static str,
    value: String,
    currency: String,
}

impl MetaClient {
    /// Create a new Conversions API client.
    #[must_use]
    pub fn new(config: &MetaConfig, source_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "https://graph.facebook.com/{API_VERSION}/{}/events",
                config.pixel_id
            ),
            access_token: config.access_token.expose_secret().to_string(),
            source_url: source_url.to_string(),
        }
    }

    /// Relay a purchase to Meta.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the request cannot be sent. A non-2xx
    /// response from Meta is logged but not treated as an error; the webhook
    /// must still be acknowledged to Shopify.
    pub async fn track_purchase(&self, purchase: &PurchaseEvent) -> Result<(), reqwest::Error> {
        let em = hashed_email(&purchase.customer_email);

        let payload = EventsPayload {
            data: vec![Event {
                event_name: "Purchase",
                event_time: chrono::Utc::now().timestamp(),
                action_source: "website",
                event_source_url: self.source_url.clone(),
                user_data: UserData {
                    em,
                    client_ip_address: purchase.customer_ip.clone().unwrap_or_default(),
                },
                custom_data: CustomData {
                    content_ids: purchase.content_ids.iter().map(ToString::to_string).collect(),
                    content_name: purchase.content_names.join(", "),
                    content_type: "product",
                    value: purchase.total_price.clone(),
                    currency: purchase.currency.clone(),
                },
            }],
            access_token: self.access_token.clone(),
        };

        self.send(payload).await
    }

    async fn send(&self, payload: EventsPayload) -> Result<(), reqwest::Error> {
        let response = self.client.post(&self.endpoint).json(&payload).send().await?;

        if response.status().is_success() {
            debug!("Meta event accepted");
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Meta Conversions API rejected event"
            );
        }

        Ok(())
    }
}

impl AnalyticsSink for MetaClient {
    /// Fire-and-forget relay; the cart action never waits on Meta.
    fn add_to_cart(&self, event: &AddToCartEvent) {
        let client = self.clone();
        let payload = EventsPayload {
            data: vec![Event {
                event_name: "AddToCart",
                event_time: chrono::Utc::now().timestamp(),
                action_source: "website",
                event_source_url: client.source_url.clone(),
                user_data: UserData {
                    em: vec![],
                    client_ip_address: String::new(),
                },
                custom_data: CustomData {
                    content_ids: vec![event.product_id.clone()],
                    content_name: event.product_name.clone(),
                    content_type: "product",
                    value: format!("{:.2}", event.value()),
                    currency: event.currency.clone(),
                },
            }],
            access_token: client.access_token.clone(),
        };

        tokio::spawn(async move {
            if let Err(e) = client.send(payload).await {
                error!(error = %e, "Failed to send AddToCart event to Meta");
            }
        });
    }
}
