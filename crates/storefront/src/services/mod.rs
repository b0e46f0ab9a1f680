//! Outbound integration clients.
//!
//! - `meta` - Meta Conversions API relay (purchase and add-to-cart events)
//! - `resend` - contact form email relay
//! - `newsletter` - Shopify Admin REST newsletter signups

pub mod meta;
pub mod newsletter;
pub mod resend;
