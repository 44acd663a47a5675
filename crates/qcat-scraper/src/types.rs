//! Response envelopes for the catalog service.
//!
//! ## Observed shape
//!
//! ### Categories
//! `{"categories": [{"id": "cat-1", "name": "Fresh Fruits", ...}]}`. Ids have
//! been seen both as strings and as integers, so they are captured as raw
//! JSON and rendered to a string on access.
//!
//! ### Products
//! `{"products": [{...}], ...}`. Product records vary per endpoint and app
//! version, so they stay untyped ([`RawRecord`]) until normalization. A
//! response without a `products` key is an empty page.

use serde::Deserialize;
use serde_json::Value;

/// One product as returned by the service, before normalization.
pub type RawRecord = serde_json::Map<String, Value>;

/// Top-level response from the category listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<CategorySummary>,
}

/// A single entry of the category listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySummary {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub name: String,
}

impl CategorySummary {
    /// The category identifier as a request parameter, or `None` when the
    /// listing entry carried no usable id.
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Top-level response from the product listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<RawRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_accepts_strings_and_numbers() {
        let parsed: CategoriesResponse = serde_json::from_str(
            r#"{"categories":[{"id":"abc","name":"Fruits"},{"id":42,"name":"Dairy"},{"name":"Orphan"}]}"#,
        )
        .unwrap();
        let ids: Vec<Option<String>> = parsed
            .categories
            .iter()
            .map(CategorySummary::id_string)
            .collect();
        assert_eq!(ids, vec![Some("abc".to_owned()), Some("42".to_owned()), None]);
    }

    #[test]
    fn missing_products_key_is_an_empty_page() {
        let parsed: ProductsResponse = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert!(parsed.products.is_empty());
    }

    #[test]
    fn missing_categories_key_is_an_empty_listing() {
        let parsed: CategoriesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.categories.is_empty());
    }
}
