//! Static user-facing message catalog.
//!
//! Messages are enumerated per locale instead of looked up by string key,
//! so a missing translation is unrepresentable.

use serde::{Deserialize, Serialize};

/// Supported storefront locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Parse a locale tag, falling back to English for anything unknown.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "es" => Self::Es,
            _ => Self::En,
        }
    }
}

/// User-facing cart messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMessage<'a> {
    /// Requested quantity exceeds stock for a variant.
    MaxQuantity {
        available: i64,
        product_title: &'a str,
        variant_title: &'a str,
    },
    AddError,
    UpdateError,
    RemoveError,
    FetchError,
    CreateError,
}

impl CartMessage<'_> {
    #[must_use]
    pub fn render(&self, locale: Locale) -> String {
        match (locale, self) {
            (
                Locale::En,
                Self::MaxQuantity {
                    available,
                    product_title,
                    variant_title,
                },
            ) => format!(
                "Only {available} of {product_title} ({variant_title}) available"
            ),
            (
                Locale::Es,
                Self::MaxQuantity {
                    available,
                    product_title,
                    variant_title,
                },
            ) => format!(
                "Solo {available} de {product_title} ({variant_title}) disponibles"
            ),
            (Locale::En, Self::AddError) => "Error adding item to cart".to_owned(),
            (Locale::Es, Self::AddError) => {
                "Error al agregar el artículo al carrito".to_owned()
            }
            (Locale::En, Self::UpdateError) => "Error updating item quantity".to_owned(),
            (Locale::Es, Self::UpdateError) => {
                "Error al actualizar la cantidad".to_owned()
            }
            (Locale::En, Self::RemoveError) => "Error removing item from cart".to_owned(),
            (Locale::Es, Self::RemoveError) => {
                "Error al eliminar el artículo del carrito".to_owned()
            }
            (Locale::En, Self::FetchError) => "Error fetching cart".to_owned(),
            (Locale::Es, Self::FetchError) => "Error al obtener el carrito".to_owned(),
            (Locale::En, Self::CreateError) => "Error creating cart".to_owned(),
            (Locale::Es, Self::CreateError) => "Error al crear el carrito".to_owned(),
        }
    }
}
