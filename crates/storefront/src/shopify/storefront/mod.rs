//! Shopify Storefront API client implementation.
//!
//! Sends hand-written GraphQL documents over `reqwest` and deserializes the
//! responses with `serde`. Caches products and collections using `moka`
//! (5-minute TTL); carts are mutable state and never cached.

mod cache;
mod conversions;
pub mod queries;
mod wire;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};

use gemelli_core::Cart;

use crate::config::ShopifyConfig;
use crate::shopify::{GraphQLError, ShopifyError};
use crate::shopify::types::{
    Collection, Product, ProductCollectionSortKey, ProductSortKey,
};

use cache::CacheValue;
use conversions::{convert_cart, convert_collections, convert_product, convert_products};
use queries::{
    ADD_TO_CART_MUTATION, CART_FRAGMENT, CREATE_CART_MUTATION, EDIT_CART_ITEMS_MUTATION,
    GET_ALL_PRODUCTS_QUERY, GET_CART_QUERY, GET_COLLECTION_PRODUCTS_QUERY, GET_COLLECTIONS_QUERY,
    GET_PRODUCT_QUERY, GET_PRODUCT_RECOMMENDATIONS_QUERY, PRODUCT_FRAGMENT,
    REMOVE_FROM_CART_MUTATION, with_fragments,
};
use wire::{
    CartCreateData, CartData, CartLinesAddData, CartLinesRemoveData, CartLinesUpdateData,
    CartMutationPayload, CollectionProductsData, CollectionsData, GraphQLResponse, ProductData,
    ProductRecommendationsData, ProductsData,
};

/// Outbound request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Input for adding a line to a cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
}

/// Input for updating an existing cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    pub quantity: i64,
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides access to products, collections, and cart operations.
/// Products and collections are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    default_country: String,
    cache: Cache<String, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyConfig, default_country: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint,
                access_token: config.storefront_private_token.expose_secret().to_string(),
                default_country: default_country.to_string(),
                cache,
            }),
        }
    }

    /// Country applied to `@inContext`, falling back to the configured default.
    fn country<'a>(&'a self, country: Option<&'a str>) -> &'a str {
        country.unwrap_or(&self.inner.default_country)
    }

    /// Execute a GraphQL document.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        document: String,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError> {
        let request_body = json!({
            "query": document,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            // See: https://shopify.dev/docs/storefronts/headless/building-with-the-storefront-api/getting-started
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ShopifyError::Timeout
                } else {
                    ShopifyError::Http(e)
                }
            })?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ShopifyError::Timeout
            } else {
                ShopifyError::Http(e)
            }
        })?;

        // Check for non-success status codes
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        // Parse the response
        let response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if !response.errors.is_empty() {
            tracing::debug!(errors = ?response.errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(response.errors));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// Direct lookups return hidden products; only listings filter them.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product(
        &self,
        handle: &str,
        country: Option<&str>,
    ) -> Result<Product, ShopifyError> {
        let country = self.country(country);
        let cache_key = format!("product:{handle}:{country}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let data: ProductData = self
            .execute(
                with_fragments(GET_PRODUCT_QUERY, &[PRODUCT_FRAGMENT]),
                json!({ "handle": handle, "country": country }),
            )
            .await?;

        let product = data
            .product
            .and_then(|product| convert_product(product, false))
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get every listed product, hidden ones filtered out.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        sort_key: Option<ProductSortKey>,
        reverse: Option<bool>,
        country: Option<&str>,
    ) -> Result<Vec<Product>, ShopifyError> {
        let country = self.country(country);
        let cache_key = format!(
            "products:{}:{}:{country}",
            sort_key.map_or("", ProductSortKey::as_str),
            reverse.unwrap_or(false),
        );

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data: ProductsData = self
            .execute(
                with_fragments(GET_ALL_PRODUCTS_QUERY, &[PRODUCT_FRAGMENT]),
                json!({
                    "country": country,
                    "reverse": reverse,
                    "sortKey": sort_key,
                }),
            )
            .await?;

        let products = convert_products(conversions::flatten_edges(data.products));

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get recommendations for a product. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
        country: Option<&str>,
    ) -> Result<Vec<Product>, ShopifyError> {
        let country = self.country(country);

        let data: ProductRecommendationsData = self
            .execute(
                with_fragments(GET_PRODUCT_RECOMMENDATIONS_QUERY, &[PRODUCT_FRAGMENT]),
                json!({ "productId": product_id, "country": country }),
            )
            .await?;

        Ok(convert_products(
            data.product_recommendations.unwrap_or_default(),
        ))
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get all collections, with a synthetic "All" entry prepended and
    /// operational (`hidden*`) collections dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self) -> Result<Vec<Collection>, ShopifyError> {
        let cache_key = "collections".to_string();

        // Check cache
        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data: CollectionsData = self
            .execute(GET_COLLECTIONS_QUERY.to_string(), json!({}))
            .await?;

        let collections = convert_collections(conversions::flatten_edges(data.collections));

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    /// Get the products in a collection.
    ///
    /// The pseudo-handle `all` queries the full catalog instead; its sort
    /// key is mapped onto the catalog sort vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown handle, or an error if the API
    /// request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        sort_key: Option<ProductCollectionSortKey>,
        reverse: Option<bool>,
        country: Option<&str>,
    ) -> Result<Vec<Product>, ShopifyError> {
        if handle == "all" {
            let sort_key = sort_key.and_then(|key| match key {
                ProductCollectionSortKey::Title => Some(ProductSortKey::Title),
                ProductCollectionSortKey::Price => Some(ProductSortKey::Price),
                ProductCollectionSortKey::BestSelling => Some(ProductSortKey::BestSelling),
                ProductCollectionSortKey::Created => Some(ProductSortKey::CreatedAt),
                ProductCollectionSortKey::Id => Some(ProductSortKey::Id),
                ProductCollectionSortKey::Relevance => Some(ProductSortKey::Relevance),
                ProductCollectionSortKey::CollectionDefault => None,
            });
            return self.get_products(sort_key, reverse, country).await;
        }

        let country = self.country(country);

        let data: CollectionProductsData = self
            .execute(
                with_fragments(GET_COLLECTION_PRODUCTS_QUERY, &[PRODUCT_FRAGMENT]),
                json!({
                    "handle": handle,
                    "sortKey": sort_key,
                    "reverse": reverse,
                    "country": country,
                }),
            )
            .await?;

        let collection = data
            .collection
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        Ok(convert_products(conversions::flatten_edges(
            collection.products,
        )))
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart, optionally with initial lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines))]
    pub async fn create_cart(
        &self,
        lines: Option<Vec<CartLineInput>>,
        country: Option<&str>,
    ) -> Result<Cart, ShopifyError> {
        let country = self.country(country);

        let data: CartCreateData = self
            .execute(
                with_fragments(CREATE_CART_MUTATION, &[CART_FRAGMENT, PRODUCT_FRAGMENT]),
                json!({ "lineItems": lines, "country": country }),
            )
            .await?;

        cart_from_payload(data.cart_create, "cartCreate")
    }

    /// Get an existing cart. Returns `None` when Shopify no longer knows the
    /// ID (expired or completed carts).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(
        &self,
        cart_id: &str,
        country: Option<&str>,
    ) -> Result<Option<Cart>, ShopifyError> {
        let country = self.country(country);

        let data: CartData = self
            .execute(
                with_fragments(GET_CART_QUERY, &[CART_FRAGMENT, PRODUCT_FRAGMENT]),
                json!({ "cartId": cart_id, "country": country }),
            )
            .await?;

        Ok(data.cart.map(convert_cart))
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineInput>,
        country: Option<&str>,
    ) -> Result<Cart, ShopifyError> {
        let country = self.country(country);

        let data: CartLinesAddData = self
            .execute(
                with_fragments(ADD_TO_CART_MUTATION, &[CART_FRAGMENT, PRODUCT_FRAGMENT]),
                json!({ "cartId": cart_id, "lines": lines, "country": country }),
            )
            .await?;

        cart_from_payload(data.cart_lines_add, "cartLinesAdd")
    }

    /// Update existing cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart(
        &self,
        cart_id: &str,
        lines: Vec<CartLineUpdateInput>,
        country: Option<&str>,
    ) -> Result<Cart, ShopifyError> {
        let country = self.country(country);

        let data: CartLinesUpdateData = self
            .execute(
                with_fragments(EDIT_CART_ITEMS_MUTATION, &[CART_FRAGMENT, PRODUCT_FRAGMENT]),
                json!({ "cartId": cart_id, "lines": lines, "country": country }),
            )
            .await?;

        cart_from_payload(data.cart_lines_update, "cartLinesUpdate")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: Vec<String>,
        country: Option<&str>,
    ) -> Result<Cart, ShopifyError> {
        let country = self.country(country);

        let data: CartLinesRemoveData = self
            .execute(
                with_fragments(REMOVE_FROM_CART_MUTATION, &[CART_FRAGMENT, PRODUCT_FRAGMENT]),
                json!({ "cartId": cart_id, "lineIds": line_ids, "country": country }),
            )
            .await?;

        cart_from_payload(data.cart_lines_remove, "cartLinesRemove")
    }

    // =========================================================================
    // Cache Invalidation
    // =========================================================================

    /// Invalidate a cached product for the default country.
    pub async fn invalidate_product(&self, handle: &str) {
        let cache_key = format!("product:{handle}:{}", self.inner.default_country);
        self.inner.cache.invalidate(&cache_key).await;
    }

    /// Invalidate everything (products, listings, collections).
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}

/// Unwrap a cart mutation payload: surface user errors, then the cart.
fn cart_from_payload(
    payload: Option<CartMutationPayload>,
    operation: &'static str,
) -> Result<Cart, ShopifyError> {
    let Some(payload) = payload else {
        return Err(ShopifyError::GraphQL(vec![GraphQLError {
            message: format!("{operation}: missing mutation payload"),
            locations: vec![],
            path: vec![],
        }]));
    };

    if !payload.user_errors.is_empty() {
        return Err(ShopifyError::UserError(
            payload
                .user_errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    payload.cart.map(convert_cart).ok_or_else(|| {
        ShopifyError::GraphQL(vec![GraphQLError {
            message: format!("{operation}: no cart in payload"),
            locations: vec![],
            path: vec![],
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_line_inputs_serialize_camel_case() {
        let line = CartLineInput {
            merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json.get("merchandiseId").and_then(|v| v.as_str()),
            Some("gid://shopify/ProductVariant/1")
        );

        let update = CartLineUpdateInput {
            id: "gid://shopify/CartLine/1".to_string(),
            quantity: 3,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.get("quantity").and_then(serde_json::Value::as_i64), Some(3));
    }

    #[test]
    fn missing_payload_is_an_error() {
        let result = cart_from_payload(None, "cartLinesAdd");
        assert!(matches!(result, Err(ShopifyError::GraphQL(_))));
    }

    #[test]
    fn user_errors_are_joined_into_one_message() {
        let payload = CartMutationPayload {
            cart: None,
            user_errors: vec![
                wire::RawUserError {
                    field: None,
                    message: "Quantity must be positive".to_string(),
                },
                wire::RawUserError {
                    field: Some(vec!["lines".to_string()]),
                    message: "Variant is out of stock".to_string(),
                },
            ],
        };
        let result = cart_from_payload(Some(payload), "cartLinesAdd");
        match result {
            Err(ShopifyError::UserError(message)) => {
                assert_eq!(
                    message,
                    "Quantity must be positive; Variant is out of stock"
                );
            }
            other => panic!("expected user error, got {other:?}"),
        }
    }
}
