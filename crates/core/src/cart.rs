//! Cart view-model types.
//!
//! Fields serialize in camelCase to match the JSON shape the browser client
//! consumes. Amounts are decimal strings; arithmetic happens in [`crate::totals`].

use serde::{Deserialize, Serialize};

/// Currency used when a cart has no lines to take one from.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A monetary amount: decimal string plus ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

impl Money {
    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: &str) -> Self {
        Self {
            amount: "0".to_owned(),
            currency_code: currency_code.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub alt_text: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// Slim product projection carried on cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<Image>,
}

/// Variant payload for an add-to-cart dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartVariant {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub selected_options: Vec<SelectedOption>,
    pub quantity_available: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandise {
    pub id: String,
    pub title: String,
    pub selected_options: Vec<SelectedOption>,
    pub quantity_available: Option<i64>,
    pub product: CartProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    pub total_amount: Money,
}

/// One cart line. `id` is absent for lines added locally that the server has
/// not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Option<String>,
    pub quantity: i64,
    pub cost: CartLineCost,
    pub merchandise: CartMerchandise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    pub total_tax_amount: Money,
}

/// The cart aggregate. `total_quantity` and `cost` are derived from `lines`;
/// the reducer recomputes them on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Option<String>,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub lines: Vec<CartLine>,
    pub cost: CartCost,
}

impl Cart {
    /// The canonical empty cart: no id, no checkout URL, zeroed totals in
    /// [`DEFAULT_CURRENCY`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: None,
            checkout_url: String::new(),
            total_quantity: 0,
            lines: Vec::new(),
            cost: CartCost {
                subtotal_amount: Money::zero(DEFAULT_CURRENCY),
                total_amount: Money::zero(DEFAULT_CURRENCY),
                total_tax_amount: Money::zero(DEFAULT_CURRENCY),
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_is_zeroed() {
        let cart = Cart::empty();
        assert_eq!(cart.id, None);
        assert_eq!(cart.checkout_url, "");
        assert_eq!(cart.total_quantity, 0);
        assert!(cart.lines.is_empty());
        assert_eq!(cart.cost.total_amount, Money::zero("USD"));
        assert_eq!(cart.cost.subtotal_amount, Money::zero("USD"));
        assert_eq!(cart.cost.total_tax_amount, Money::zero("USD"));
    }

    #[test]
    fn cart_serializes_camel_case() {
        let cart = Cart::empty();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.get("checkoutUrl").is_some());
        assert!(json.get("totalQuantity").is_some());
        assert!(json["cost"].get("subtotalAmount").is_some());
        assert!(json["cost"]["totalAmount"].get("currencyCode").is_some());
    }

    #[test]
    fn cart_round_trips_through_json() {
        let json = serde_json::json!({
            "id": "gid://shopify/Cart/abc",
            "checkoutUrl": "https://shop.example/checkout",
            "totalQuantity": 2,
            "lines": [{
                "id": "gid://shopify/CartLine/1",
                "quantity": 2,
                "cost": { "totalAmount": { "amount": "39.98", "currencyCode": "USD" } },
                "merchandise": {
                    "id": "gid://shopify/ProductVariant/1",
                    "title": "Small",
                    "selectedOptions": [{ "name": "Size", "value": "Small" }],
                    "quantityAvailable": 5,
                    "product": {
                        "id": "gid://shopify/Product/1",
                        "handle": "tee",
                        "title": "Tee",
                        "featuredImage": null
                    }
                }
            }],
            "cost": {
                "subtotalAmount": { "amount": "39.98", "currencyCode": "USD" },
                "totalAmount": { "amount": "39.98", "currencyCode": "USD" },
                "totalTaxAmount": { "amount": "0", "currencyCode": "USD" }
            }
        });

        let cart: Cart = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(cart.total_quantity, 2);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(serde_json::to_value(&cart).unwrap(), json);
    }
}
