//! GraphQL documents for the Storefront API.
//!
//! Operations are stored as string constants and composed with their
//! fragments at call time. Every operation takes a `$country` variable and
//! carries an `@inContext` directive so prices come back localized.

/// Product fields shared by every product-bearing operation.
pub const PRODUCT_FRAGMENT: &str = r"
fragment product on Product {
  id
  handle
  availableForSale
  title
  description
  descriptionHtml
  options {
    id
    name
    values
  }
  priceRange {
    maxVariantPrice {
      amount
      currencyCode
    }
    minVariantPrice {
      amount
      currencyCode
    }
  }
  variants(first: 250) {
    edges {
      node {
        id
        title
        availableForSale
        quantityAvailable
        selectedOptions {
          name
          value
        }
        price {
          amount
          currencyCode
        }
      }
    }
  }
  featuredImage {
    url
    altText
    width
    height
  }
  images(first: 20) {
    edges {
      node {
        url
        altText
        width
        height
      }
    }
  }
  seo {
    title
    description
  }
  tags
  updatedAt
}
";

/// Cart fields shared by the cart query and every cart mutation.
pub const CART_FRAGMENT: &str = r"
fragment cart on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount {
      amount
      currencyCode
    }
    totalAmount {
      amount
      currencyCode
    }
    totalTaxAmount {
      amount
      currencyCode
    }
  }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        cost {
          totalAmount {
            amount
            currencyCode
          }
        }
        merchandise {
          ... on ProductVariant {
            id
            title
            quantityAvailable
            selectedOptions {
              name
              value
            }
            product {
              ...product
            }
          }
        }
      }
    }
  }
}
";

pub const GET_PRODUCT_QUERY: &str = r"
query getProduct($handle: String!, $country: CountryCode) @inContext(country: $country) {
  product(handle: $handle) {
    ...product
  }
}
";

pub const GET_PRODUCT_RECOMMENDATIONS_QUERY: &str = r"
query getProductRecommendations($productId: ID!, $country: CountryCode) @inContext(country: $country) {
  productRecommendations(productId: $productId) {
    ...product
  }
}
";

pub const GET_ALL_PRODUCTS_QUERY: &str = r"
query getAllProducts($country: CountryCode, $reverse: Boolean, $sortKey: ProductSortKeys) @inContext(country: $country) {
  products(first: 250, reverse: $reverse, sortKey: $sortKey) {
    edges {
      node {
        ...product
      }
    }
  }
}
";

pub const GET_COLLECTION_PRODUCTS_QUERY: &str = r"
query getCollectionProducts($handle: String!, $sortKey: ProductCollectionSortKeys, $reverse: Boolean, $country: CountryCode) @inContext(country: $country) {
  collection(handle: $handle) {
    products(sortKey: $sortKey, reverse: $reverse, first: 100) {
      edges {
        node {
          ...product
        }
      }
    }
  }
}
";

pub const GET_COLLECTIONS_QUERY: &str = r"
query getCollections {
  collections(first: 100, sortKey: TITLE) {
    edges {
      node {
        handle
        title
        description
        seo {
          title
          description
        }
        updatedAt
        image {
          url
          altText
          width
          height
        }
      }
    }
  }
}
";

pub const GET_CART_QUERY: &str = r"
query getCart($cartId: ID!, $country: CountryCode) @inContext(country: $country) {
  cart(id: $cartId) {
    ...cart
  }
}
";

pub const CREATE_CART_MUTATION: &str = r"
mutation createCart($lineItems: [CartLineInput!], $country: CountryCode) @inContext(country: $country) {
  cartCreate(input: { lines: $lineItems }) {
    cart {
      ...cart
    }
    userErrors {
      field
      message
    }
  }
}
";

pub const ADD_TO_CART_MUTATION: &str = r"
mutation addToCart($cartId: ID!, $lines: [CartLineInput!]!, $country: CountryCode) @inContext(country: $country) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      ...cart
    }
    userErrors {
      field
      message
    }
  }
}
";

pub const EDIT_CART_ITEMS_MUTATION: &str = r"
mutation editCartItems($cartId: ID!, $lines: [CartLineUpdateInput!]!, $country: CountryCode) @inContext(country: $country) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart {
      ...cart
    }
    userErrors {
      field
      message
    }
  }
}
";

pub const REMOVE_FROM_CART_MUTATION: &str = r"
mutation removeFromCart($cartId: ID!, $lineIds: [ID!]!, $country: CountryCode) @inContext(country: $country) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart {
      ...cart
    }
    userErrors {
      field
      message
    }
  }
}
";

/// Compose an operation with the fragments it references.
#[must_use]
pub fn with_fragments(operation: &str, fragments: &[&str]) -> String {
    let mut document = String::with_capacity(
        operation.len() + fragments.iter().map(|f| f.len()).sum::<usize>(),
    );
    document.push_str(operation);
    for fragment in fragments {
        document.push_str(fragment);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_fragments_appends_all_fragments() {
        let document = with_fragments(GET_CART_QUERY, &[CART_FRAGMENT, PRODUCT_FRAGMENT]);
        assert!(document.contains("query getCart"));
        assert!(document.contains("fragment cart on Cart"));
        assert!(document.contains("fragment product on Product"));
    }

    #[test]
    fn cart_operations_reference_the_cart_fragment() {
        for operation in [
            GET_CART_QUERY,
            CREATE_CART_MUTATION,
            ADD_TO_CART_MUTATION,
            EDIT_CART_ITEMS_MUTATION,
            REMOVE_FROM_CART_MUTATION,
        ] {
            assert!(operation.contains("...cart"));
        }
    }

    #[test]
    fn every_localized_operation_carries_in_context() {
        for operation in [
            GET_PRODUCT_QUERY,
            GET_PRODUCT_RECOMMENDATIONS_QUERY,
            GET_ALL_PRODUCTS_QUERY,
            GET_COLLECTION_PRODUCTS_QUERY,
            GET_CART_QUERY,
            CREATE_CART_MUTATION,
            ADD_TO_CART_MUTATION,
            EDIT_CART_ITEMS_MUTATION,
            REMOVE_FROM_CART_MUTATION,
        ] {
            assert!(operation.contains("@inContext(country: $country)"));
        }
    }
}
