//! Application state shared across handlers.

use std::sync::Arc;

use gemelli_core::{AnalyticsSink, NoopAnalytics};

use crate::config::StorefrontConfig;
use crate::services::meta::MetaClient;
use crate::services::newsletter::NewsletterClient;
use crate::services::resend::ResendClient;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Shopify client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    analytics: Arc<dyn AnalyticsSink>,
    meta: Option<MetaClient>,
    contact: Option<ResendClient>,
    newsletter: Option<NewsletterClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Outbound integrations (Meta, Resend, Shopify Admin) are only wired up
    /// when their configuration is present; everything else degrades to
    /// no-ops or 500s at the route that needs them.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storefront = StorefrontClient::new(&config.shopify, &config.default_country);

        let source_url = format!("https://{}", config.shopify.store);
        let meta = config
            .meta
            .as_ref()
            .map(|meta_config| MetaClient::new(meta_config, &source_url));
        let analytics: Arc<dyn AnalyticsSink> = meta
            .clone()
            .map_or_else(|| Arc::new(NoopAnalytics) as Arc<dyn AnalyticsSink>, |client| {
                Arc::new(client) as Arc<dyn AnalyticsSink>
            });

        let contact = config.contact.as_ref().map(ResendClient::new);
        let newsletter = config.shopify.admin_token.as_ref().map(|token| {
            NewsletterClient::new(&config.shopify.store, &config.shopify.api_version, token)
        });

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                analytics,
                meta,
                contact,
                newsletter,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get the analytics sink shared by cart stores.
    #[must_use]
    pub fn analytics(&self) -> Arc<dyn AnalyticsSink> {
        Arc::clone(&self.inner.analytics)
    }

    /// Get the Meta Conversions API client, if configured.
    #[must_use]
    pub fn meta(&self) -> Option<&MetaClient> {
        self.inner.meta.as_ref()
    }

    /// Get the contact form relay client, if configured.
    #[must_use]
    pub fn contact(&self) -> Option<&ResendClient> {
        self.inner.contact.as_ref()
    }

    /// Get the newsletter signup client, if configured.
    #[must_use]
    pub fn newsletter(&self) -> Option<&NewsletterClient> {
        self.inner.newsletter.as_ref()
    }
}
