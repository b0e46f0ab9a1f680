//! Cart snapshot holder.
//!
//! One store per browsing session. Every change funnels through the
//! reducer; add dispatches additionally notify the analytics sink.

use std::sync::Arc;

use crate::analytics::{AddToCartEvent, AnalyticsSink};
use crate::cart::Cart;
use crate::reducer::{CartAction, reduce};

#[derive(Clone)]
pub struct CartStore {
    cart: Cart,
    analytics: Arc<dyn AnalyticsSink>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("cart", &self.cart).finish_non_exhaustive()
    }
}

impl CartStore {
    #[must_use]
    pub fn new(initial: Option<Cart>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            cart: initial.unwrap_or_else(Cart::empty),
            analytics,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Consume the store and take the snapshot out.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Apply an action to the snapshot.
    ///
    /// Add dispatches emit an add-to-cart event before the transition. The
    /// emission is observe-only; the state change happens regardless of what
    /// the sink does.
    pub fn dispatch(&mut self, action: CartAction) {
        if let CartAction::AddItem {
            variant,
            product,
            quantity,
        } = &action
        {
            self.analytics.add_to_cart(&AddToCartEvent {
                product_id: product.id.clone(),
                product_name: product.title.clone(),
                price: variant.price.amount.clone(),
                currency: variant.price.currency_code.clone(),
                quantity: *quantity,
            });
        }

        let current = std::mem::take(&mut self.cart);
        self.cart = reduce(Some(current), action);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::analytics::NoopAnalytics;
    use crate::cart::{CartProduct, CartVariant, Money};

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<AddToCartEvent>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn add_to_cart(&self, event: &AddToCartEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn add_action(variant_id: &str, amount: &str, quantity: i64) -> CartAction {
        CartAction::AddItem {
            variant: CartVariant {
                id: variant_id.to_owned(),
                title: "Small".to_owned(),
                price: Money {
                    amount: amount.to_owned(),
                    currency_code: "USD".to_owned(),
                },
                selected_options: Vec::new(),
                quantity_available: Some(10),
            },
            product: CartProduct {
                id: "gid://shopify/Product/1".to_owned(),
                handle: "tee".to_owned(),
                title: "Tee".to_owned(),
                featured_image: None,
            },
            quantity,
        }
    }

    #[test]
    fn new_store_without_initial_cart_is_empty() {
        let store = CartStore::new(None, Arc::new(NoopAnalytics));
        assert_eq!(store.cart(), &Cart::empty());
    }

    #[test]
    fn dispatch_updates_snapshot() {
        let mut store = CartStore::new(None, Arc::new(NoopAnalytics));
        store.dispatch(add_action("v1", "10.00", 2));
        assert_eq!(store.cart().total_quantity, 2);
        assert_eq!(store.cart().cost.total_amount.amount, "20");
    }

    #[test]
    fn add_dispatch_notifies_sink() {
        let sink = Arc::new(RecordingSink::default());
        let mut store = CartStore::new(None, Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        store.dispatch(add_action("v1", "19.99", 3));
        store.dispatch(CartAction::UpdateItem {
            merchandise_id: "v1".to_owned(),
            quantity: 1,
        });

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].product_name, "Tee");
        assert_eq!(events[0].quantity, 3);
        assert!((events[0].value() - 59.97).abs() < 1e-9);
    }

    #[test]
    fn set_cart_does_not_notify_sink() {
        let sink = Arc::new(RecordingSink::default());
        let mut store = CartStore::new(None, Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        store.dispatch(CartAction::SetCart { cart: Cart::empty() });
        assert!(sink.events.lock().unwrap().is_empty());
    }
}
