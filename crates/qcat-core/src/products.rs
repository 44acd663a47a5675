use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder written into string fields the remote record did not supply.
pub const SENTINEL: &str = "N/A";

/// A catalog product normalized into the fixed export schema.
///
/// Field order here is the column order of every export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProduct {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub weight: String,
    pub unit: String,
    pub quantity: String,
    /// Selling price in the display currency's base unit.
    pub price: f64,
    /// Maximum retail price; `0.0` when the listing did not carry one.
    pub mrp: f64,
    /// `((mrp - price) / mrp) * 100`, rounded to two places; `0.0` without an MRP.
    pub discount_percent: f64,
    pub availability: bool,
    pub rating: f64,
    pub review_count: u32,
    /// Tags joined with `", "`, in listing order.
    pub tags: String,
    pub image_url: String,
    pub thumbnail_url: String,
    #[serde(with = "scraped_at_format")]
    pub scraped_at: NaiveDateTime,
}

impl CanonicalProduct {
    /// Returns `true` if the listing carried a usable image URL.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty() && self.image_url != SENTINEL
    }
}

/// Why the page loop for a category stopped.
///
/// Exhaustion and a genuinely empty page end pagination the same way; the
/// distinction is kept for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStop {
    /// The service answered with no records.
    EmptyPage,
    /// Every retry for the page failed.
    Exhausted,
    /// Fewer records than the page size came back.
    ShortPage,
    /// The configured page cap was reached.
    MaxPages,
    /// A run-level interrupt was requested between pages.
    Interrupted,
    /// The category name did not match any listed category.
    Unresolved,
}

impl std::fmt::Display for PageStop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PageStop::EmptyPage => "empty page",
            PageStop::Exhausted => "retries exhausted",
            PageStop::ShortPage => "short page",
            PageStop::MaxPages => "max pages reached",
            PageStop::Interrupted => "interrupted",
            PageStop::Unresolved => "category not found",
        };
        f.write_str(label)
    }
}

/// Products collected for one requested category during a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Category name exactly as requested.
    pub category: String,
    /// Service identifier the name resolved to, if any.
    pub category_id: Option<String>,
    pub pages_fetched: u32,
    pub stop: PageStop,
    pub products: Vec<CanonicalProduct>,
}

impl CategoryResult {
    /// An empty result for a category name that matched nothing.
    #[must_use]
    pub fn unresolved(category: &str) -> Self {
        Self {
            category: category.to_owned(),
            category_id: None,
            pages_fetched: 0,
            stop: PageStop::Unresolved,
            products: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// `YYYY-MM-DD HH:MM:SS` (second precision) for `scraped_at`.
pub mod scraped_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    /// # Errors
    ///
    /// Returns a deserializer error if the string is not in [`FORMAT`].
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample_product() -> CanonicalProduct {
        CanonicalProduct {
            product_id: "p-1".to_owned(),
            name: "Alphonso Mango".to_owned(),
            brand: "Farm Fresh".to_owned(),
            category: "Fruits".to_owned(),
            subcategory: "Mangoes".to_owned(),
            description: SENTINEL.to_owned(),
            weight: "1".to_owned(),
            unit: "kg".to_owned(),
            quantity: "1".to_owned(),
            price: 180.0,
            mrp: 200.0,
            discount_percent: 10.0,
            availability: true,
            rating: 4.5,
            review_count: 12,
            tags: "seasonal, organic".to_owned(),
            image_url: "https://cdn.example.com/p-1.png".to_owned(),
            thumbnail_url: SENTINEL.to_owned(),
            scraped_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(9, 30, 5))
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn scraped_at_serializes_with_second_precision() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["scraped_at"], "2024-05-01 09:30:05");
    }

    #[test]
    fn serialized_keys_follow_field_order() {
        let json = serde_json::to_string(&sample_product()).unwrap();
        let id_pos = json.find("\"product_id\"").unwrap();
        let mrp_pos = json.find("\"mrp\"").unwrap();
        let scraped_pos = json.find("\"scraped_at\"").unwrap();
        assert!(id_pos < mrp_pos && mrp_pos < scraped_pos);
    }

    #[test]
    fn has_image_is_false_for_sentinel() {
        let mut product = sample_product();
        assert!(product.has_image());
        product.image_url = SENTINEL.to_owned();
        assert!(!product.has_image());
    }

    #[test]
    fn unresolved_result_is_empty() {
        let result = CategoryResult::unresolved("snacks");
        assert!(result.is_empty());
        assert_eq!(result.stop, PageStop::Unresolved);
        assert!(result.category_id.is_none());
    }
}
