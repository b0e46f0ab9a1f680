//! Cache types for Storefront API responses.

use crate::shopify::types::{Collection, Product};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collections(Vec<Collection>),
}
