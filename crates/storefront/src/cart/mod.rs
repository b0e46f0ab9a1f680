//! Cart orchestration on top of the Storefront API client.

pub mod actions;

pub use actions::{AddItemInput, CartActionError};
