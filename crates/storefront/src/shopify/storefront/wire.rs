//! Raw GraphQL response shapes for the Storefront API.
//!
//! These mirror the JSON Shopify actually returns, edge/node wrappers and
//! all. The conversions module flattens them into the domain types in
//! [`crate::shopify::types`] and `gemelli_core`.

use serde::Deserialize;

use crate::shopify::GraphQLError;
use gemelli_core::{Money, SelectedOption};

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

/// A paginated connection of edges.
///
/// Defaults to empty so a missing connection field deserializes to no items.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// A single edge wrapping a node. Nodes can be null in the payload.
#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub min_variant_price: Money,
    pub max_variant_price: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub quantity_available: Option<i64>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub price: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub options: Vec<RawProductOption>,
    pub price_range: RawPriceRange,
    #[serde(default)]
    pub variants: Connection<RawVariant>,
    pub featured_image: Option<RawImage>,
    #[serde(default)]
    pub images: Connection<RawImage>,
    pub seo: Option<RawSeo>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<RawProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendationsData {
    pub product_recommendations: Option<Vec<RawProduct>>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Connection<RawProduct>,
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub seo: Option<RawSeo>,
    #[serde(default)]
    pub updated_at: String,
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsData {
    #[serde(default)]
    pub collections: Connection<RawCollection>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    pub collection: Option<CollectionProducts>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionProducts {
    #[serde(default)]
    pub products: Connection<RawProduct>,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    pub total_tax_amount: Option<Money>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartLineCost {
    pub total_amount: Money,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMerchandise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub quantity_available: Option<i64>,
    pub product: RawProduct,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartLine {
    pub id: String,
    pub quantity: i64,
    pub cost: RawCartLineCost,
    pub merchandise: RawMerchandise,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    #[serde(default)]
    pub lines: Connection<RawCartLine>,
    pub cost: RawCartCost,
}

#[derive(Debug, Deserialize)]
pub struct CartData {
    pub cart: Option<RawCart>,
}

/// User error attached to a cart mutation payload.
#[derive(Debug, Deserialize)]
pub struct RawUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload common to every cart mutation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<RawCart>,
    #[serde(default)]
    pub user_errors: Vec<RawUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_connection_defaults_to_empty() {
        let data: ProductsData = serde_json::from_str("{}").unwrap();
        assert!(data.products.edges.is_empty());
    }

    #[test]
    fn null_nodes_survive_deserialization() {
        let json = r#"{"edges": [{"node": null}, {"node": {"url": "https://cdn/x.jpg", "altText": null, "width": 100, "height": 100}}]}"#;
        let conn: Connection<RawImage> = serde_json::from_str(json).unwrap();
        assert_eq!(conn.edges.len(), 2);
        assert!(conn.edges[0].node.is_none());
        assert!(conn.edges[1].node.is_some());
    }

    #[test]
    fn graphql_envelope_carries_errors_without_data() {
        let json = r#"{"data": null, "errors": [{"message": "Throttled"}]}"#;
        let response: GraphQLResponse<CartData> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors.len(), 1);
    }
}
