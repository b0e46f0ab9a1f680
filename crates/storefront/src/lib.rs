//! Gemelli storefront library.
//!
//! Headless storefront API server: catalog and cart endpoints backed by the
//! Shopify Storefront API, webhook relays to Meta, and contact/newsletter
//! integrations. The binary in `main.rs` wires these modules into an axum
//! server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod shopify;
pub mod state;
