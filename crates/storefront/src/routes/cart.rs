//! Cart route handlers.
//!
//! Cart IDs live in the session and map to Shopify carts. Handlers delegate
//! to [`crate::cart::actions`] for validation and orchestration and return
//! the normalized cart as JSON.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gemelli_core::Cart;

use crate::cart::{AddItemInput, actions};
use crate::error::Result;
use crate::session;
use crate::state::AppState;

/// Update cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartBody {
    pub line_id: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartBody {
    pub line_id: String,
}

/// Get the current cart. Buyers without a session cart get an empty cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<Cart>> {
    let cart_id = session::cart_id(&session).await;
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let cart = actions::get_cart(
        state.storefront(),
        cart_id.as_deref(),
        country.as_deref(),
        locale,
    )
    .await?;

    Ok(Json(cart))
}

/// Create a fresh cart and remember its ID in the session.
#[instrument(skip(state, session))]
pub async fn create(State(state): State<AppState>, session: Session) -> Result<Json<Cart>> {
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let cart = actions::create_cart(state.storefront(), country.as_deref(), locale).await?;

    if let Some(cart_id) = &cart.id
        && let Err(e) = session::set_cart_id(&session, cart_id).await
    {
        tracing::error!(error = %e, "Failed to save cart ID to session");
    }

    Ok(Json(cart))
}

/// Add an item to the session's cart.
#[instrument(skip(state, session, body))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddItemInput>,
) -> Result<Json<Cart>> {
    let cart_id = session::cart_id(&session).await;
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let cart = actions::add_item(
        state.storefront(),
        &state.analytics(),
        cart_id.as_deref(),
        body,
        country.as_deref(),
        locale,
    )
    .await?;

    Ok(Json(cart))
}

/// Update a line's quantity. Zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateCartBody>,
) -> Result<Json<Cart>> {
    let cart_id = session::cart_id(&session).await;
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let cart = actions::update_item_quantity(
        state.storefront(),
        cart_id.as_deref(),
        &body.line_id,
        body.quantity,
        country.as_deref(),
        locale,
    )
    .await?;

    Ok(Json(cart))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RemoveFromCartBody>,
) -> Result<Json<Cart>> {
    let cart_id = session::cart_id(&session).await;
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let cart = actions::remove_item(
        state.storefront(),
        cart_id.as_deref(),
        &body.line_id,
        country.as_deref(),
        locale,
    )
    .await?;

    Ok(Json(cart))
}

/// Redirect to Shopify checkout for the session's cart.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart_id = session::cart_id(&session).await;
    let country = session::country(&session).await;
    let locale = session::locale(&session).await;

    let url = actions::checkout_url(
        state.storefront(),
        cart_id.as_deref(),
        country.as_deref(),
        locale,
    )
    .await?;

    Ok(Redirect::to(&url).into_response())
}
