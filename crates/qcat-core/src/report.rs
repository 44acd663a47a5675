use serde::{Deserialize, Serialize};

/// Price band used by the histogram in [`AggregateReport`].
///
/// Bands are half-open, so every non-negative price falls in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    /// `price < 50`
    Under50,
    /// `50 <= price < 100`
    From50To100,
    /// `100 <= price < 200`
    From100To200,
    /// `price >= 200`
    Over200,
}

impl PriceBucket {
    #[must_use]
    pub fn for_price(price: f64) -> Self {
        if price < 50.0 {
            PriceBucket::Under50
        } else if price < 100.0 {
            PriceBucket::From50To100
        } else if price < 200.0 {
            PriceBucket::From100To200
        } else {
            PriceBucket::Over200
        }
    }
}

/// Product counts per [`PriceBucket`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRanges {
    pub under_50: usize,
    #[serde(rename = "50_100")]
    pub from_50_to_100: usize,
    #[serde(rename = "100_200")]
    pub from_100_to_200: usize,
    pub over_200: usize,
}

impl PriceRanges {
    pub fn record(&mut self, price: f64) {
        let slot = match PriceBucket::for_price(price) {
            PriceBucket::Under50 => &mut self.under_50,
            PriceBucket::From50To100 => &mut self.from_50_to_100,
            PriceBucket::From100To200 => &mut self.from_100_to_200,
            PriceBucket::Over200 => &mut self.over_200,
        };
        *slot += 1;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.under_50 + self.from_50_to_100 + self.from_100_to_200 + self.over_200
    }
}

/// Summary statistics over one category's normalized products.
///
/// The `Default` value is the report for an empty category: every count and
/// average is zero and both sets are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_products: usize,
    pub available_products: usize,
    pub unavailable_products: usize,
    pub average_price: f64,
    pub average_mrp: f64,
    pub average_discount: f64,
    pub max_price: f64,
    pub min_price: f64,
    /// Distinct brands, sorted, without the sentinel.
    pub brands: Vec<String>,
    /// Distinct categories, sorted, without the sentinel.
    pub categories: Vec<String>,
    pub price_ranges: PriceRanges,
}

impl AggregateReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_products == 0
    }
}
