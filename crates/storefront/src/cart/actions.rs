//! Cart actions: validation, stock ceiling, optimistic dispatch, mutation.
//!
//! Each action validates its inputs before touching the network, then runs
//! the Shopify mutation and returns the server's cart. Transport and user
//! errors collapse into a single localized message per action; the precise
//! failure is logged, never surfaced to the client.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, instrument};

use gemelli_core::{
    AnalyticsSink, Cart, CartAction, CartMessage, CartProduct, CartStore, CartVariant, Locale,
};

use crate::shopify::{CartLineInput, CartLineUpdateInput, StorefrontClient};

/// Errors from cart actions.
///
/// Every variant's display text is safe to show to a buyer.
#[derive(Debug, Error)]
pub enum CartActionError {
    /// No cart ID in the session.
    #[error("Missing cart ID")]
    MissingCartId,

    /// Add request without a variant ID.
    #[error("Missing variant ID")]
    MissingVariantId,

    /// Update or remove request without a line ID.
    #[error("Missing line ID")]
    MissingLineId,

    /// The session's cart no longer exists in Shopify.
    #[error("Cart not found")]
    CartNotFound,

    /// Requested quantity exceeds available stock.
    #[error("{0}")]
    ExceedsStock(String),

    /// The backend call failed; carries a localized generic message.
    #[error("{0}")]
    Backend(String),
}

/// Payload for an add-to-cart action.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AddItemInput {
    pub variant: CartVariant,
    pub product: CartProduct,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

/// Reject an add that would push a line past the variant's available stock.
///
/// Runs before the network call so a buyer mashing the add button gets the
/// limit message instantly instead of a mutation round-trip.
fn check_stock_ceiling(
    current: &Cart,
    variant: &CartVariant,
    product_title: &str,
    requested: i64,
    locale: Locale,
) -> Result<(), CartActionError> {
    let Some(available) = variant.quantity_available else {
        return Ok(());
    };

    let existing = current
        .lines
        .iter()
        .find(|line| line.merchandise.id == variant.id)
        .map_or(0, |line| line.quantity);

    if existing + requested > available {
        return Err(CartActionError::ExceedsStock(
            CartMessage::MaxQuantity {
                available,
                product_title,
                variant_title: &variant.title,
            }
            .render(locale),
        ));
    }

    Ok(())
}

/// Fetch the current cart, collapsing failures into a localized message.
async fn fetch_cart(
    storefront: &StorefrontClient,
    cart_id: &str,
    country: Option<&str>,
    locale: Locale,
) -> Result<Option<Cart>, CartActionError> {
    storefront.get_cart(cart_id, country).await.map_err(|e| {
        error!(error = %e, "Failed to fetch cart");
        CartActionError::Backend(CartMessage::FetchError.render(locale))
    })
}

/// Get the session's cart, or an empty cart when there is none yet.
///
/// # Errors
///
/// Returns a localized error if the fetch fails.
#[instrument(skip(storefront))]
pub async fn get_cart(
    storefront: &StorefrontClient,
    cart_id: Option<&str>,
    country: Option<&str>,
    locale: Locale,
) -> Result<Cart, CartActionError> {
    let Some(cart_id) = cart_id else {
        return Ok(Cart::empty());
    };

    Ok(fetch_cart(storefront, cart_id, country, locale)
        .await?
        .unwrap_or_else(Cart::empty))
}

/// Add an item to the cart.
///
/// Checks the stock ceiling against the server cart, dispatches the add
/// through a [`CartStore`] (which emits the analytics event), then runs the
/// mutation and reconciles the store with the server's cart. The server cart
/// is what gets returned; a failed mutation leaves no trace beyond the error.
///
/// # Errors
///
/// Returns validation errors before any network call, a stock-limit message
/// when the ceiling is hit, or a localized generic error if the backend call
/// fails.
#[instrument(skip(storefront, analytics, input))]
pub async fn add_item(
    storefront: &StorefrontClient,
    analytics: &Arc<dyn AnalyticsSink>,
    cart_id: Option<&str>,
    input: AddItemInput,
    country: Option<&str>,
    locale: Locale,
) -> Result<Cart, CartActionError> {
    let Some(cart_id) = cart_id else {
        return Err(CartActionError::MissingCartId);
    };
    if input.variant.id.is_empty() {
        return Err(CartActionError::MissingVariantId);
    }

    let current = fetch_cart(storefront, cart_id, country, locale)
        .await?
        .ok_or(CartActionError::CartNotFound)?;

    check_stock_ceiling(
        &current,
        &input.variant,
        &input.product.title,
        input.quantity,
        locale,
    )?;

    let merchandise_id = input.variant.id.clone();
    let quantity = input.quantity;

    // Optimistic local dispatch; this is where the add-to-cart event fires.
    let mut store = CartStore::new(Some(current), Arc::clone(analytics));
    store.dispatch(CartAction::AddItem {
        variant: input.variant,
        product: input.product,
        quantity,
    });

    match storefront
        .add_to_cart(
            cart_id,
            vec![CartLineInput {
                merchandise_id,
                quantity,
            }],
            country,
        )
        .await
    {
        Ok(cart) => {
            // Server truth replaces the optimistic state wholesale.
            store.dispatch(CartAction::SetCart { cart: cart.clone() });
            Ok(cart)
        }
        Err(e) => {
            error!(error = %e, "Failed to add item to cart");
            Err(CartActionError::Backend(
                CartMessage::AddError.render(locale),
            ))
        }
    }
}

/// Update a line's quantity. Zero removes the line.
///
/// # Errors
///
/// Returns validation errors before any network call, or a localized
/// generic error if the backend call fails.
#[instrument(skip(storefront))]
pub async fn update_item_quantity(
    storefront: &StorefrontClient,
    cart_id: Option<&str>,
    line_id: &str,
    quantity: i64,
    country: Option<&str>,
    locale: Locale,
) -> Result<Cart, CartActionError> {
    let Some(cart_id) = cart_id else {
        return Err(CartActionError::MissingCartId);
    };
    if line_id.is_empty() {
        return Err(CartActionError::MissingLineId);
    }

    let result = if quantity == 0 {
        storefront
            .remove_from_cart(cart_id, vec![line_id.to_string()], country)
            .await
    } else {
        storefront
            .update_cart(
                cart_id,
                vec![CartLineUpdateInput {
                    id: line_id.to_string(),
                    quantity,
                }],
                country,
            )
            .await
    };

    result.map_err(|e| {
        error!(error = %e, "Failed to update item quantity");
        CartActionError::Backend(CartMessage::UpdateError.render(locale))
    })
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns validation errors before any network call, or a localized
/// generic error if the backend call fails.
#[instrument(skip(storefront))]
pub async fn remove_item(
    storefront: &StorefrontClient,
    cart_id: Option<&str>,
    line_id: &str,
    country: Option<&str>,
    locale: Locale,
) -> Result<Cart, CartActionError> {
    let Some(cart_id) = cart_id else {
        return Err(CartActionError::MissingCartId);
    };
    if line_id.is_empty() {
        return Err(CartActionError::MissingLineId);
    }

    storefront
        .remove_from_cart(cart_id, vec![line_id.to_string()], country)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to remove item from cart");
            CartActionError::Backend(CartMessage::RemoveError.render(locale))
        })
}

/// Resolve the checkout URL for the session's cart.
///
/// # Errors
///
/// Returns `MissingCartId` without a session cart, `CartNotFound` when the
/// cart has expired, or a localized error if the fetch fails.
#[instrument(skip(storefront))]
pub async fn checkout_url(
    storefront: &StorefrontClient,
    cart_id: Option<&str>,
    country: Option<&str>,
    locale: Locale,
) -> Result<String, CartActionError> {
    let Some(cart_id) = cart_id else {
        return Err(CartActionError::MissingCartId);
    };

    let cart = fetch_cart(storefront, cart_id, country, locale)
        .await?
        .ok_or(CartActionError::CartNotFound)?;

    Ok(cart.checkout_url)
}

/// Create a fresh cart.
///
/// # Errors
///
/// Returns a localized error if the backend call fails.
#[instrument(skip(storefront))]
pub async fn create_cart(
    storefront: &StorefrontClient,
    country: Option<&str>,
    locale: Locale,
) -> Result<Cart, CartActionError> {
    storefront.create_cart(None, country).await.map_err(|e| {
        error!(error = %e, "Failed to create cart");
        CartActionError::Backend(CartMessage::CreateError.render(locale))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemelli_core::{Money, NoopAnalytics, reduce};
    use secrecy::SecretString;

    use crate::config::ShopifyConfig;

    fn test_client() -> StorefrontClient {
        StorefrontClient::new(
            &ShopifyConfig {
                store: "test.myshopify.com".to_string(),
                api_version: "2026-01".to_string(),
                storefront_private_token: SecretString::from("shpat_test"),
                webhook_secret: SecretString::from("whsec_test"),
                admin_token: None,
            },
            "US",
        )
    }

    fn variant(quantity_available: Option<i64>) -> CartVariant {
        CartVariant {
            id: "gid://shopify/ProductVariant/1".to_string(),
            title: "Small".to_string(),
            price: Money {
                amount: "19.99".to_string(),
                currency_code: "USD".to_string(),
            },
            selected_options: vec![],
            quantity_available,
        }
    }

    fn product() -> CartProduct {
        CartProduct {
            id: "gid://shopify/Product/1".to_string(),
            handle: "tee".to_string(),
            title: "Tee".to_string(),
            featured_image: None,
        }
    }

    fn cart_with_line(quantity: i64) -> Cart {
        let variant = variant(Some(5));
        reduce(
            None,
            CartAction::AddItem {
                product: product(),
                quantity,
                variant,
            },
        )
    }

    #[tokio::test]
    async fn add_without_cart_id_short_circuits() {
        let client = test_client();
        let analytics: Arc<dyn AnalyticsSink> = Arc::new(NoopAnalytics);
        let input = AddItemInput {
            variant: variant(None),
            product: product(),
            quantity: 1,
        };
        let result = add_item(&client, &analytics, None, input, None, Locale::En).await;
        assert!(matches!(result, Err(CartActionError::MissingCartId)));
    }

    #[tokio::test]
    async fn add_without_variant_id_short_circuits() {
        let client = test_client();
        let analytics: Arc<dyn AnalyticsSink> = Arc::new(NoopAnalytics);
        let mut input = AddItemInput {
            variant: variant(None),
            product: product(),
            quantity: 1,
        };
        input.variant.id = String::new();
        let result = add_item(&client, &analytics, Some("cart-1"), input, None, Locale::En).await;
        assert!(matches!(result, Err(CartActionError::MissingVariantId)));
    }

    #[tokio::test]
    async fn update_without_cart_id_short_circuits() {
        let client = test_client();
        let result =
            update_item_quantity(&client, None, "line-1", 2, None, Locale::En).await;
        assert!(matches!(result, Err(CartActionError::MissingCartId)));
    }

    #[tokio::test]
    async fn remove_without_line_id_short_circuits() {
        let client = test_client();
        let result = remove_item(&client, Some("cart-1"), "", None, Locale::En).await;
        assert!(matches!(result, Err(CartActionError::MissingLineId)));
    }

    #[tokio::test]
    async fn checkout_without_cart_id_short_circuits() {
        let client = test_client();
        let result = checkout_url(&client, None, None, Locale::En).await;
        assert!(matches!(result, Err(CartActionError::MissingCartId)));
    }

    #[test]
    fn stock_ceiling_counts_existing_quantity() {
        let current = cart_with_line(4);
        let result = check_stock_ceiling(&current, &variant(Some(5)), "Tee", 2, Locale::En);
        match result {
            Err(CartActionError::ExceedsStock(message)) => {
                assert_eq!(message, "Only 5 of Tee (Small) available");
            }
            other => panic!("expected stock error, got {other:?}"),
        }
    }

    #[test]
    fn stock_ceiling_allows_exact_fit() {
        let current = cart_with_line(3);
        assert!(check_stock_ceiling(&current, &variant(Some(5)), "Tee", 2, Locale::En).is_ok());
    }

    #[test]
    fn stock_ceiling_skipped_when_inventory_untracked() {
        let current = cart_with_line(100);
        assert!(check_stock_ceiling(&current, &variant(None), "Tee", 100, Locale::En).is_ok());
    }

    #[test]
    fn stock_ceiling_localizes_the_message() {
        let current = cart_with_line(5);
        let result = check_stock_ceiling(&current, &variant(Some(5)), "Tee", 1, Locale::Es);
        match result {
            Err(CartActionError::ExceedsStock(message)) => {
                assert_eq!(message, "Solo 5 de Tee (Small) disponibles");
            }
            other => panic!("expected stock error, got {other:?}"),
        }
    }
}
