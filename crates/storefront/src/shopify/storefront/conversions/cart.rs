//! Cart conversion functions.

use gemelli_core::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartProduct, Money,
};

use crate::shopify::storefront::wire::{RawCart, RawCartLine, RawMerchandise};

use super::flatten_edges;
use super::products::convert_product;

/// Convert a raw cart into the canonical domain cart.
///
/// Flattens the line connection and fills in a zero tax amount (in the
/// cart's total currency) when Shopify omits it.
pub fn convert_cart(cart: RawCart) -> Cart {
    let total_currency = cart.cost.total_amount.currency_code.clone();
    let total_tax_amount = cart.cost.total_tax_amount.unwrap_or(Money {
        amount: "0.0".to_string(),
        currency_code: total_currency,
    });

    Cart {
        id: Some(cart.id),
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
        lines: flatten_edges(cart.lines)
            .into_iter()
            .map(convert_line)
            .collect(),
        cost: CartCost {
            subtotal_amount: cart.cost.subtotal_amount,
            total_amount: cart.cost.total_amount,
            total_tax_amount,
        },
    }
}

fn convert_line(line: RawCartLine) -> CartLine {
    CartLine {
        id: Some(line.id),
        quantity: line.quantity,
        cost: CartLineCost {
            total_amount: line.cost.total_amount,
        },
        merchandise: convert_merchandise(line.merchandise),
    }
}

/// Project the full product carried on a line down to the slim shape the
/// cart keeps.
fn convert_merchandise(merchandise: RawMerchandise) -> CartMerchandise {
    // Hidden filtering never applies here: the buyer already has the line.
    let product = convert_product(merchandise.product, false).map_or_else(
        || CartProduct {
            id: String::new(),
            handle: String::new(),
            title: String::new(),
            featured_image: None,
        },
        |product| CartProduct {
            id: product.id,
            handle: product.handle,
            title: product.title,
            featured_image: product.featured_image,
        },
    );

    CartMerchandise {
        id: merchandise.id,
        title: merchandise.title,
        selected_options: merchandise.selected_options,
        quantity_available: merchandise.quantity_available,
        product,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::storefront::wire::{
        Connection, Edge, RawCartCost, RawCartLineCost, RawPriceRange, RawProduct,
    };

    fn money(amount: &str, currency: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: currency.to_string(),
        }
    }

    fn raw_product() -> RawProduct {
        RawProduct {
            id: "gid://shopify/Product/1".to_string(),
            handle: "tee".to_string(),
            available_for_sale: true,
            title: "Tee".to_string(),
            description: String::new(),
            description_html: String::new(),
            options: vec![],
            price_range: RawPriceRange {
                min_variant_price: money("10.0", "USD"),
                max_variant_price: money("10.0", "USD"),
            },
            variants: Connection::default(),
            featured_image: None,
            images: Connection::default(),
            seo: None,
            tags: vec![],
            updated_at: String::new(),
        }
    }

    fn raw_line(quantity: i64) -> RawCartLine {
        RawCartLine {
            id: "gid://shopify/CartLine/1".to_string(),
            quantity,
            cost: RawCartLineCost {
                total_amount: money("19.99", "USD"),
            },
            merchandise: RawMerchandise {
                id: "gid://shopify/ProductVariant/1".to_string(),
                title: "Small".to_string(),
                selected_options: vec![],
                quantity_available: Some(5),
                product: raw_product(),
            },
        }
    }

    fn raw_cart(tax: Option<Money>) -> RawCart {
        RawCart {
            id: "gid://shopify/Cart/abc".to_string(),
            checkout_url: "https://shop.example/checkout".to_string(),
            total_quantity: 1,
            lines: Connection {
                edges: vec![Edge {
                    node: Some(raw_line(1)),
                }],
            },
            cost: RawCartCost {
                subtotal_amount: money("19.99", "EUR"),
                total_amount: money("19.99", "EUR"),
                total_tax_amount: tax,
            },
        }
    }

    #[test]
    fn missing_tax_defaults_to_zero_in_total_currency() {
        let cart = convert_cart(raw_cart(None));
        assert_eq!(cart.cost.total_tax_amount.amount, "0.0");
        assert_eq!(cart.cost.total_tax_amount.currency_code, "EUR");
    }

    #[test]
    fn present_tax_is_kept() {
        let cart = convert_cart(raw_cart(Some(money("1.60", "EUR"))));
        assert_eq!(cart.cost.total_tax_amount.amount, "1.60");
    }

    #[test]
    fn lines_keep_server_ids_and_slim_product_projection() {
        let cart = convert_cart(raw_cart(None));
        assert_eq!(cart.lines.len(), 1);
        let line = &cart.lines[0];
        assert_eq!(line.id.as_deref(), Some("gid://shopify/CartLine/1"));
        assert_eq!(line.merchandise.product.handle, "tee");
        assert_eq!(line.merchandise.quantity_available, Some(5));
    }

    #[test]
    fn null_line_nodes_are_dropped() {
        let mut cart = raw_cart(None);
        cart.lines.edges.push(Edge { node: None });
        let converted = convert_cart(cart);
        assert_eq!(converted.lines.len(), 1);
    }
}
