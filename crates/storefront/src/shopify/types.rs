//! Domain types for the Shopify Storefront API.
//!
//! These are the reshaped types handed to API consumers, separate from the
//! raw wire types the GraphQL responses deserialize into. Cart types live in
//! `gemelli_core`; the types here cover products and collections.
//!
//! Everything serializes camelCase to match the storefront's JSON API.

use gemelli_core::{Image, Money, SelectedOption};
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// SEO Types
// =============================================================================

/// SEO metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Product option definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option ID.
    pub id: String,
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Quantity available (if inventory tracking enabled).
    pub quantity_available: Option<i64>,
    /// Current price.
    pub price: Money,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images, with alt text filled in when the source omits it.
    pub images: Vec<Image>,
    /// SEO metadata.
    pub seo: Seo,
    /// Product tags.
    pub tags: Vec<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// URL handle. Empty for the synthetic "All" collection.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// SEO metadata.
    pub seo: Seo,
    /// Last update timestamp.
    pub updated_at: String,
    /// Site path for this collection (e.g., `/collections/summer`).
    pub path: String,
    /// Collection image.
    pub image: Option<Image>,
}

// =============================================================================
// Sort Keys
// =============================================================================

/// Sort keys for product queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    /// Sort by title.
    Title,
    /// Sort by last update.
    UpdatedAt,
    /// Sort by creation date.
    CreatedAt,
    /// Sort by best selling.
    BestSelling,
    /// Sort by price.
    Price,
    /// Sort by ID.
    Id,
    /// Sort by relevance (for search).
    #[default]
    Relevance,
}

impl ProductSortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::UpdatedAt => "UPDATED_AT",
            Self::CreatedAt => "CREATED_AT",
            Self::BestSelling => "BEST_SELLING",
            Self::Price => "PRICE",
            Self::Id => "ID",
            Self::Relevance => "RELEVANCE",
        }
    }
}

/// Sort keys for products within a collection.
///
/// Collections sort by `CREATED`, not `CREATED_AT`; the parser accepts both
/// spellings so callers can reuse one sort vocabulary across search and
/// collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCollectionSortKey {
    /// Default collection order.
    #[default]
    CollectionDefault,
    /// Sort by title.
    Title,
    /// Sort by price.
    Price,
    /// Sort by best selling.
    BestSelling,
    /// Sort by creation date.
    Created,
    /// Sort by ID.
    Id,
    /// Sort by relevance.
    Relevance,
}

impl ProductCollectionSortKey {
    /// Parse a sort key tag, mapping `CREATED_AT` to `CREATED`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "COLLECTION_DEFAULT" => Some(Self::CollectionDefault),
            "TITLE" => Some(Self::Title),
            "PRICE" => Some(Self::Price),
            "BEST_SELLING" => Some(Self::BestSelling),
            "CREATED" | "CREATED_AT" => Some(Self::Created),
            "ID" => Some(Self::Id),
            "RELEVANCE" => Some(Self::Relevance),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CollectionDefault => "COLLECTION_DEFAULT",
            Self::Title => "TITLE",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
            Self::Created => "CREATED",
            Self::Id => "ID",
            Self::Relevance => "RELEVANCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_sort_key_accepts_both_created_spellings() {
        assert_eq!(
            ProductCollectionSortKey::parse("CREATED_AT"),
            Some(ProductCollectionSortKey::Created)
        );
        assert_eq!(
            ProductCollectionSortKey::parse("CREATED"),
            Some(ProductCollectionSortKey::Created)
        );
        assert_eq!(ProductCollectionSortKey::parse("NOPE"), None);
    }

    #[test]
    fn sort_keys_render_screaming_snake_case() {
        assert_eq!(ProductSortKey::CreatedAt.as_str(), "CREATED_AT");
        assert_eq!(ProductCollectionSortKey::Created.as_str(), "CREATED");
        assert_eq!(
            ProductCollectionSortKey::CollectionDefault.as_str(),
            "COLLECTION_DEFAULT"
        );
    }

    #[test]
    fn product_serializes_camel_case() {
        let product = Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "tee".to_string(),
            available_for_sale: true,
            title: "Tee".to_string(),
            description: String::new(),
            description_html: String::new(),
            options: vec![],
            price_range: PriceRange {
                min_variant_price: Money {
                    amount: "10.0".to_string(),
                    currency_code: "USD".to_string(),
                },
                max_variant_price: Money {
                    amount: "20.0".to_string(),
                    currency_code: "USD".to_string(),
                },
            },
            variants: vec![],
            featured_image: None,
            images: vec![],
            seo: Seo {
                title: None,
                description: None,
            },
            tags: vec![],
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("availableForSale").is_some());
        assert!(json.get("priceRange").is_some());
        assert!(json.get("descriptionHtml").is_some());
    }
}
