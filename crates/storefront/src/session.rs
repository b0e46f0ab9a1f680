//! Session configuration and typed accessors.
//!
//! Sessions hold the buyer's cart ID plus their country and locale
//! preferences. The store is in-memory; sessions do not survive a restart,
//! which is acceptable because the cart itself lives in Shopify.

use gemelli_core::Locale;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gemelli_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session keys.
pub mod keys {
    pub const CART_ID: &str = "cartId";
    pub const COUNTRY: &str = "country";
    pub const LOCALE: &str = "locale";
}

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get the cart ID from the session.
pub async fn cart_id(session: &Session) -> Option<String> {
    session.get::<String>(keys::CART_ID).await.ok().flatten()
}

/// Set the cart ID in the session.
pub async fn set_cart_id(
    session: &Session,
    cart_id: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART_ID, cart_id).await
}

/// Get the buyer's country preference, if one was set.
pub async fn country(session: &Session) -> Option<String> {
    session.get::<String>(keys::COUNTRY).await.ok().flatten()
}

/// Set the buyer's country preference.
pub async fn set_country(
    session: &Session,
    country: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::COUNTRY, country).await
}

/// Get the buyer's locale, defaulting to English.
pub async fn locale(session: &Session) -> Locale {
    session
        .get::<String>(keys::LOCALE)
        .await
        .ok()
        .flatten()
        .map_or_else(Locale::default, |tag| Locale::parse(&tag))
}

/// Set the buyer's locale.
pub async fn set_locale(
    session: &Session,
    locale: Locale,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LOCALE, locale.as_str()).await
}
