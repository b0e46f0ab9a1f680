//! Conversions from raw GraphQL payloads into domain types.

pub mod cart;
pub mod collections;
pub mod products;

pub use cart::convert_cart;
pub use collections::convert_collections;
pub use products::{convert_product, convert_products};

use super::wire::Connection;

/// Flatten an edge/node connection, dropping null nodes.
pub fn flatten_edges<T>(connection: Connection<T>) -> Vec<T> {
    connection
        .edges
        .into_iter()
        .filter_map(|edge| edge.node)
        .collect()
}
