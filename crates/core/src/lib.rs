//! Gemelli Core - Cart domain library.
//!
//! Pure types and state transitions for the storefront cart. The crate has
//! no I/O, no HTTP clients, and no async; the `storefront` crate wires these
//! pieces into handlers.
//!
//! # Modules
//!
//! - [`cart`] - Cart view-model types (camelCase JSON)
//! - [`reducer`] - Pure cart state transitions
//! - [`totals`] - Aggregate quantity and cost computation
//! - [`store`] - Snapshot holder with analytics hooks
//! - [`analytics`] - Event sink trait
//! - [`i18n`] - Static user-facing message catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod i18n;
pub mod reducer;
pub mod store;
pub mod totals;

pub use analytics::{AddToCartEvent, AnalyticsSink, NoopAnalytics};
pub use cart::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartProduct, CartVariant, Image,
    Money, SelectedOption,
};
pub use i18n::{CartMessage, Locale};
pub use reducer::{CartAction, reduce};
pub use store::CartStore;
