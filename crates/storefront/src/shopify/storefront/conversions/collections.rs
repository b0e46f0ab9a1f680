//! Collection conversion functions.

use chrono::Utc;
use gemelli_core::Image;

use crate::shopify::storefront::wire::RawCollection;
use crate::shopify::types::{Collection, Seo};

/// Collection handles with this prefix are operational and never listed.
const HIDDEN_COLLECTION_PREFIX: &str = "hidden";

/// Convert a raw collection, deriving its site path from the handle.
pub fn convert_collection(collection: RawCollection) -> Collection {
    let path = format!("/collections/{}", collection.handle);
    let seo = collection.seo.map_or_else(
        || Seo {
            title: Some(collection.title.clone()),
            description: Some(collection.description.clone()),
        },
        |seo| Seo {
            title: seo.title,
            description: seo.description,
        },
    );

    Collection {
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        seo,
        updated_at: collection.updated_at,
        path,
        image: collection.image.map(|image| Image {
            url: image.url,
            alt_text: image.alt_text.unwrap_or_default(),
            width: image.width,
            height: image.height,
        }),
    }
}

/// The synthetic "All" collection listed ahead of the real ones.
#[must_use]
pub fn all_collection() -> Collection {
    Collection {
        handle: String::new(),
        title: "All".to_string(),
        description: "All products".to_string(),
        seo: Seo {
            title: Some("All".to_string()),
            description: Some("All products".to_string()),
        },
        updated_at: Utc::now().to_rfc3339(),
        path: "/collections/all".to_string(),
        image: None,
    }
}

/// Convert the collection listing: prepend "All" and drop hidden collections.
pub fn convert_collections(collections: Vec<RawCollection>) -> Vec<Collection> {
    std::iter::once(all_collection())
        .chain(
            collections
                .into_iter()
                .filter(|collection| !collection.handle.starts_with(HIDDEN_COLLECTION_PREFIX))
                .map(convert_collection),
        )
        .collect()
}
