//! Product conversion functions.

use gemelli_core::Image;
use url::Url;

use crate::shopify::storefront::wire::{RawImage, RawProduct};
use crate::shopify::types::{PriceRange, Product, ProductOption, ProductVariant, Seo};

use super::flatten_edges;

/// Tag marking products that must never surface through the API.
pub const HIDDEN_PRODUCT_TAG: &str = "nextjs-frontend-hidden";

/// Derive alt text for an image that came back without any.
///
/// Uses the product title plus the filename stem of the image URL, so
/// `.../products/red-shirt-front.jpg` becomes `"Red Shirt - red-shirt-front"`.
fn derive_alt_text(product_title: &str, image_url: &str) -> String {
    let filename = Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(ToOwned::to_owned))
        })
        .map(|name| {
            name.split('.')
                .next()
                .unwrap_or_default()
                .to_owned()
        })
        .unwrap_or_default();

    format!("{product_title} - {filename}")
}

fn convert_image(image: RawImage, product_title: &str) -> Image {
    let alt_text = match image.alt_text {
        Some(alt) if !alt.is_empty() => alt,
        _ => derive_alt_text(product_title, &image.url),
    };

    Image {
        url: image.url,
        alt_text,
        width: image.width,
        height: image.height,
    }
}

/// Convert a raw product, reshaping edge/node lists into plain vectors.
///
/// Returns `None` for hidden products when `filter_hidden` is set. Direct
/// handle lookups pass `false`: a product fetched by its own handle is
/// always returned.
pub fn convert_product(product: RawProduct, filter_hidden: bool) -> Option<Product> {
    if filter_hidden && product.tags.iter().any(|tag| tag == HIDDEN_PRODUCT_TAG) {
        return None;
    }

    let title = product.title;

    Some(Product {
        id: product.id,
        handle: product.handle,
        available_for_sale: product.available_for_sale,
        description: product.description,
        description_html: product.description_html,
        options: product
            .options
            .into_iter()
            .map(|option| ProductOption {
                id: option.id,
                name: option.name,
                values: option.values,
            })
            .collect(),
        price_range: PriceRange {
            min_variant_price: product.price_range.min_variant_price,
            max_variant_price: product.price_range.max_variant_price,
        },
        variants: flatten_edges(product.variants)
            .into_iter()
            .map(|variant| ProductVariant {
                id: variant.id,
                title: variant.title,
                available_for_sale: variant.available_for_sale,
                quantity_available: variant.quantity_available,
                price: variant.price,
                selected_options: variant.selected_options,
            })
            .collect(),
        featured_image: product
            .featured_image
            .map(|image| convert_image(image, &title)),
        images: flatten_edges(product.images)
            .into_iter()
            .map(|image| convert_image(image, &title))
            .collect(),
        seo: product
            .seo
            .map_or_else(
                || Seo {
                    title: None,
                    description: None,
                },
                |seo| Seo {
                    title: seo.title,
                    description: seo.description,
                },
            ),
        tags: product.tags,
        updated_at: product.updated_at,
        title,
    })
}

/// Convert a batch of raw products, dropping hidden ones.
pub fn convert_products(products: Vec<RawProduct>) -> Vec<Product> {
    products
        .into_iter()
        .filter_map(|product| convert_product(product, true))
        .collect()
}
