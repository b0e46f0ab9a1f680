//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Cart
//! GET  /api/cart                            - Current cart (empty when no session cart)
//! POST /api/cart                            - Create a cart, store its ID in the session
//! POST /api/cart/add                        - Add an item
//! POST /api/cart/update                     - Update a line's quantity (0 removes)
//! POST /api/cart/remove                     - Remove a line
//! GET  /checkout                            - Redirect to Shopify checkout
//!
//! # Catalog
//! GET  /api/products                        - Product listing (?sort_key=&reverse=)
//! GET  /api/products/{handle}               - Product detail
//! GET  /api/products/{handle}/recommendations - Related products
//! GET  /api/collections                     - Collection listing
//! GET  /api/collections/{handle}/products   - Collection products (?sort_key=&reverse=)
//!
//! # Integrations
//! POST /api/webhooks/shopify                - Shopify webhook receiver (HMAC verified)
//! POST /api/contact                         - Contact form relay
//! POST /api/subscribe                       - Newsletter signup
//! POST /api/preferences                     - Buyer country/locale preferences
//! ```

pub mod cart;
pub mod collections;
pub mod contact;
pub mod newsletter;
pub mod preferences;
pub mod products;
pub mod webhooks;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::create))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
        .route("/{handle}/recommendations", get(products::recommendations))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}/products", get(collections::products))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Checkout redirect
        .route("/checkout", get(cart::checkout))
        // JSON API
        .nest("/api/cart", cart_routes())
        .nest("/api/products", product_routes())
        .nest("/api/collections", collection_routes())
        .route("/api/webhooks/shopify", post(webhooks::shopify))
        .route("/api/contact", post(contact::submit))
        .route("/api/subscribe", post(newsletter::subscribe))
        .route("/api/preferences", post(preferences::update))
}
