//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::session;
use crate::shopify::types::{Product, ProductSortKey};
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sort_key: Option<ProductSortKey>,
    pub reverse: Option<bool>,
}

/// List every product in the catalog.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let country = session::country(&session).await;

    let products = state
        .storefront()
        .get_products(query.sort_key, query.reverse, country.as_deref())
        .await?;

    Ok(Json(products))
}

/// Get a product by handle.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(handle): Path<String>,
) -> Result<Json<Product>> {
    let country = session::country(&session).await;

    let product = state
        .storefront()
        .get_product(&handle, country.as_deref())
        .await?;

    Ok(Json(product))
}

/// Get recommendations for a product.
///
/// The product is resolved by handle first so recommendations work with the
/// same URLs the rest of the API uses.
#[instrument(skip(state, session))]
pub async fn recommendations(
    State(state): State<AppState>,
    session: Session,
    Path(handle): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let country = session::country(&session).await;

    let product = state
        .storefront()
        .get_product(&handle, country.as_deref())
        .await?;

    let related = state
        .storefront()
        .get_product_recommendations(&product.id, country.as_deref())
        .await?;

    Ok(Json(related))
}
