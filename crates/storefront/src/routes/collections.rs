//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::session;
use crate::shopify::types::{Collection, Product, ProductCollectionSortKey};
use crate::state::AppState;

/// Collection products query parameters.
///
/// `sort_key` stays a string so `CREATED_AT` can be accepted as an alias
/// for the collection sort key `CREATED`.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub sort_key: Option<String>,
    pub reverse: Option<bool>,
}

/// List all collections.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Collection>>> {
    let collections = state.storefront().get_collections().await?;
    Ok(Json(collections))
}

/// List the products in a collection.
#[instrument(skip(state, session))]
pub async fn products(
    State(state): State<AppState>,
    session: Session,
    Path(handle): Path<String>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let sort_key = query
        .sort_key
        .as_deref()
        .map(|tag| {
            ProductCollectionSortKey::parse(tag)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown sort key: {tag}")))
        })
        .transpose()?;

    let country = session::country(&session).await;

    let products = state
        .storefront()
        .get_collection_products(&handle, sort_key, query.reverse, country.as_deref())
        .await?;

    Ok(Json(products))
}
