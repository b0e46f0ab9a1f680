//! Analytics event sink.
//!
//! The cart layer never talks to a tracking backend directly. It emits
//! events through [`AnalyticsSink`] and the binary decides where they go.

use serde::Serialize;

/// Emitted when a variant is merged into the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartEvent {
    pub product_id: String,
    pub product_name: String,
    /// Raw price string as carried on the variant.
    pub price: String,
    pub currency: String,
    pub quantity: i64,
}

impl AddToCartEvent {
    /// Reported event value: unit price times quantity.
    #[must_use]
    pub fn value(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let quantity = self.quantity as f64;
        coerce_price(&self.price) * quantity
    }
}

/// Coerce a price string to a number for value-based reporting.
///
/// Everything except digits and dots is stripped before parsing, so
/// formatted inputs like `"$19.99"` still report. Malformed input reports
/// as zero; tracking must never fail a cart operation.
#[must_use]
pub fn coerce_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Where cart events go.
///
/// Implementations must not block the caller and must swallow their own
/// failures.
pub trait AnalyticsSink: Send + Sync {
    fn add_to_cart(&self, event: &AddToCartEvent);
}

/// Sink that drops every event. Used in tests and deployments with no
/// tracking configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn add_to_cart(&self, _event: &AddToCartEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_price_parses_plain_decimal() {
        assert!((coerce_price("19.99") - 19.99).abs() < f64::EPSILON);
    }

    #[test]
    fn coerce_price_strips_formatting() {
        assert!((coerce_price("$1,299.50") - 1299.50).abs() < f64::EPSILON);
    }

    #[test]
    fn coerce_price_malformed_is_zero() {
        assert!(coerce_price("free").abs() < f64::EPSILON);
        assert!(coerce_price("").abs() < f64::EPSILON);
        assert!(coerce_price("1.2.3").abs() < f64::EPSILON);
    }

    #[test]
    fn event_value_scales_by_quantity() {
        let event = AddToCartEvent {
            product_id: "gid://shopify/Product/1".to_owned(),
            product_name: "Tee".to_owned(),
            price: "19.99".to_owned(),
            currency: "USD".to_owned(),
            quantity: 3,
        };
        assert!((event.value() - 59.97).abs() < 1e-9);
    }
}
