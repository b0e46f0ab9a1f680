//! Pure cart state transitions.
//!
//! The reducer is total: any action against any state (including none)
//! yields a well-formed cart. It never touches the network; server
//! reconciliation arrives as a [`CartAction::SetCart`].

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, CartLineCost, CartMerchandise, CartProduct, CartVariant, Money};
use crate::totals;

/// Cart transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Merge a variant into the cart. An existing line for the same
    /// merchandise absorbs the quantity additively; otherwise a new,
    /// id-less line is appended.
    AddItem {
        variant: CartVariant,
        product: CartProduct,
        quantity: i64,
    },
    /// Set an existing line to an absolute quantity. Zero or negative
    /// removes the line.
    UpdateItem {
        merchandise_id: String,
        quantity: i64,
    },
    /// Replace the snapshot wholesale with a server-confirmed cart.
    SetCart { cart: Cart },
}

/// Apply `action` to `state`, treating a missing state as the empty cart.
#[must_use]
pub fn reduce(state: Option<Cart>, action: CartAction) -> Cart {
    let current = state.unwrap_or_else(Cart::empty);

    match action {
        CartAction::AddItem {
            variant,
            product,
            quantity,
        } => add_item(current, variant, product, quantity),
        CartAction::UpdateItem {
            merchandise_id,
            quantity,
        } => update_item(current, &merchandise_id, quantity),
        CartAction::SetCart { cart } => cart,
    }
}

fn add_item(mut cart: Cart, variant: CartVariant, product: CartProduct, quantity: i64) -> Cart {
    if let Some(line) = cart
        .lines
        .iter_mut()
        .find(|line| line.merchandise.id == variant.id)
    {
        let merged = line.quantity + quantity;
        line.quantity = merged;
        // Amount and currency both come from the incoming variant; the
        // existing line may predate a country-preference change.
        line.cost.total_amount = Money {
            amount: totals::line_cost(merged, &variant.price.amount),
            currency_code: variant.price.currency_code,
        };
    } else {
        cart.lines.push(new_line(variant, product, quantity));
    }

    reconcile(cart)
}

fn new_line(variant: CartVariant, product: CartProduct, quantity: i64) -> CartLine {
    let total = totals::line_cost(quantity, &variant.price.amount);

    CartLine {
        id: None,
        quantity,
        cost: CartLineCost {
            total_amount: Money {
                amount: total,
                currency_code: variant.price.currency_code,
            },
        },
        merchandise: CartMerchandise {
            id: variant.id,
            title: variant.title,
            selected_options: variant.selected_options,
            quantity_available: variant.quantity_available,
            product,
        },
    }
}

fn update_item(cart: Cart, merchandise_id: &str, quantity: i64) -> Cart {
    let lines: Vec<CartLine> = cart
        .lines
        .into_iter()
        .filter_map(|line| {
            if line.merchandise.id != merchandise_id {
                return Some(line);
            }
            if quantity <= 0 {
                return None;
            }

            let unit = totals::unit_amount(&line);
            let currency_code = line.cost.total_amount.currency_code.clone();
            Some(CartLine {
                quantity,
                cost: CartLineCost {
                    total_amount: Money {
                        amount: totals::line_cost(quantity, &unit),
                        currency_code,
                    },
                },
                ..line
            })
        })
        .collect();

    if lines.is_empty() {
        return Cart::empty();
    }

    reconcile(Cart { lines, ..cart })
}

/// Recompute the derived fields after any line change.
fn reconcile(mut cart: Cart) -> Cart {
    let (total_quantity, cost) = totals::compute_totals(&cart.lines);
    cart.total_quantity = total_quantity;
    cart.cost = cost;
    cart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::SelectedOption;

    fn variant(id: &str, amount: &str) -> CartVariant {
        CartVariant {
            id: id.to_owned(),
            title: "Small".to_owned(),
            price: Money {
                amount: amount.to_owned(),
                currency_code: "USD".to_owned(),
            },
            selected_options: vec![SelectedOption {
                name: "Size".to_owned(),
                value: "Small".to_owned(),
            }],
            quantity_available: Some(10),
        }
    }

    fn product(id: &str, title: &str) -> CartProduct {
        CartProduct {
            id: id.to_owned(),
            handle: title.to_lowercase(),
            title: title.to_owned(),
            featured_image: None,
        }
    }

    fn add(state: Option<Cart>, variant_id: &str, amount: &str, quantity: i64) -> Cart {
        reduce(
            state,
            CartAction::AddItem {
                variant: variant(variant_id, amount),
                product: product("gid://shopify/Product/1", "Tee"),
                quantity,
            },
        )
    }

    #[test]
    fn add_to_missing_state_builds_single_line_cart() {
        let cart = add(None, "v1", "19.99", 3);
        assert_eq!(cart.lines.len(), 1);
        let line = &cart.lines[0];
        assert_eq!(line.id, None);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.cost.total_amount.amount, "59.97");
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.cost.total_amount.amount, "59.97");
        assert_eq!(cart.cost.subtotal_amount.amount, "59.97");
        assert_eq!(cart.cost.total_tax_amount.amount, "0");
    }

    #[test]
    fn add_same_merchandise_merges_additively() {
        let cart = add(None, "v1", "10.00", 2);
        let cart = add(Some(cart), "v1", "10.00", 3);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.lines[0].cost.total_amount.amount, "50");
        assert_eq!(cart.total_quantity, 5);
        assert_eq!(cart.cost.total_amount.amount, "50");
    }

    #[test]
    fn add_merge_matches_on_merchandise_id_not_line_id() {
        let mut cart = add(None, "v1", "10.00", 1);
        // Server-confirmed line id must not affect matching.
        cart.lines[0].id = Some("gid://shopify/CartLine/99".to_owned());
        let cart = add(Some(cart), "v1", "10.00", 1);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].id.as_deref(), Some("gid://shopify/CartLine/99"));
    }

    #[test]
    fn add_distinct_merchandise_appends_in_order() {
        let cart = add(None, "v1", "10.00", 1);
        let cart = add(Some(cart), "v2", "5.00", 2);
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].merchandise.id, "v1");
        assert_eq!(cart.lines[1].merchandise.id, "v2");
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.cost.total_amount.amount, "20");
    }

    #[test]
    fn add_merge_reprices_at_incoming_unit_price() {
        // Unit price may have changed server-side between adds; the merged
        // line is costed entirely at the incoming variant price.
        let cart = add(None, "v1", "10.00", 1);
        let cart = add(Some(cart), "v1", "12.00", 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].cost.total_amount.amount, "24");
    }

    #[test]
    fn add_merge_takes_currency_from_incoming_variant() {
        // A country-preference change mid-session can reprice the variant
        // in a new currency; the merged line must not keep the old code.
        let cart = add(None, "v1", "10.00", 1);
        let mut eur = variant("v1", "9.00");
        eur.price.currency_code = "EUR".to_owned();
        let cart = reduce(
            Some(cart),
            CartAction::AddItem {
                variant: eur,
                product: product("gid://shopify/Product/1", "Tee"),
                quantity: 1,
            },
        );
        assert_eq!(cart.lines[0].cost.total_amount.amount, "18");
        assert_eq!(cart.lines[0].cost.total_amount.currency_code, "EUR");
        assert_eq!(cart.cost.total_amount.currency_code, "EUR");
    }

    #[test]
    fn update_recomputes_from_backed_out_unit_price() {
        let cart = add(None, "v1", "19.99", 3);
        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v1".to_owned(),
                quantity: 1,
            },
        );
        assert_eq!(cart.lines[0].quantity, 1);
        assert_eq!(cart.lines[0].cost.total_amount.amount, "19.99");
        assert_eq!(cart.total_quantity, 1);
    }

    #[test]
    fn update_to_zero_drops_line() {
        let cart = add(None, "v1", "10.00", 2);
        let cart = add(Some(cart), "v2", "5.00", 1);
        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v1".to_owned(),
                quantity: 0,
            },
        );
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].merchandise.id, "v2");
        assert_eq!(cart.total_quantity, 1);
        assert_eq!(cart.cost.total_amount.amount, "5");
    }

    #[test]
    fn update_negative_quantity_also_drops_line() {
        let cart = add(None, "v1", "10.00", 2);
        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v1".to_owned(),
                quantity: -1,
            },
        );
        assert_eq!(cart, Cart::empty());
    }

    #[test]
    fn dropping_last_line_canonicalizes_to_empty_cart() {
        let mut cart = add(None, "v1", "10.00", 2);
        cart.id = Some("gid://shopify/Cart/abc".to_owned());
        cart.checkout_url = "https://shop.example/checkout".to_owned();
        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v1".to_owned(),
                quantity: 0,
            },
        );
        assert_eq!(cart, Cart::empty());
    }

    #[test]
    fn update_unknown_merchandise_leaves_cart_unchanged() {
        let before = add(None, "v1", "10.00", 2);
        let after = reduce(
            Some(before.clone()),
            CartAction::UpdateItem {
                merchandise_id: "missing".to_owned(),
                quantity: 5,
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn set_cart_replaces_wholesale() {
        let local = add(None, "v1", "10.00", 2);
        let mut server = add(None, "v1", "10.00", 2);
        server.id = Some("gid://shopify/Cart/abc".to_owned());
        server.checkout_url = "https://shop.example/checkout".to_owned();
        server.lines[0].id = Some("gid://shopify/CartLine/1".to_owned());

        let cart = reduce(Some(local), CartAction::SetCart { cart: server.clone() });
        assert_eq!(cart, server);
    }

    #[test]
    fn totals_stay_consistent_across_a_session() {
        // add v1 x2, add v2 x1, update v1 to 1, remove v2
        let cart = add(None, "v1", "19.99", 2);
        let cart = add(Some(cart), "v2", "4.50", 1);
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.cost.total_amount.amount, "44.48");

        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v1".to_owned(),
                quantity: 1,
            },
        );
        assert_eq!(cart.total_quantity, 2);
        assert_eq!(cart.cost.total_amount.amount, "24.49");

        let cart = reduce(
            Some(cart),
            CartAction::UpdateItem {
                merchandise_id: "v2".to_owned(),
                quantity: 0,
            },
        );
        assert_eq!(cart.total_quantity, 1);
        assert_eq!(cart.cost.total_amount.amount, "19.99");
    }
}
