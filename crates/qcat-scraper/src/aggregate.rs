//! Summary statistics over a category's normalized products.

use std::collections::BTreeSet;

use qcat_core::{AggregateReport, CanonicalProduct, PriceRanges, SENTINEL};

use crate::normalize::round2;

/// Computes the [`AggregateReport`] for `products`.
///
/// An empty slice yields [`AggregateReport::default`]. Averages are rounded
/// to two places; min/max price are reported unrounded.
#[must_use]
pub fn analyze_products(products: &[CanonicalProduct]) -> AggregateReport {
    if products.is_empty() {
        return AggregateReport::default();
    }

    #[allow(clippy::cast_precision_loss)]
    let count = products.len() as f64;
    let available_products = products.iter().filter(|p| p.availability).count();

    let mut price_ranges = PriceRanges::default();
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    let (mut price_sum, mut mrp_sum, mut discount_sum) = (0.0, 0.0, 0.0);

    for product in products {
        price_ranges.record(product.price);
        min_price = min_price.min(product.price);
        max_price = max_price.max(product.price);
        price_sum += product.price;
        mrp_sum += product.mrp;
        discount_sum += product.discount_percent;
    }

    AggregateReport {
        total_products: products.len(),
        available_products,
        unavailable_products: products.len() - available_products,
        average_price: round2(price_sum / count),
        average_mrp: round2(mrp_sum / count),
        average_discount: round2(discount_sum / count),
        max_price,
        min_price,
        brands: distinct_known(products.iter().map(|p| p.brand.as_str())),
        categories: distinct_known(products.iter().map(|p| p.category.as_str())),
        price_ranges,
    }
}

/// Sorted distinct values, excluding the sentinel.
fn distinct_known<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| *v != SENTINEL)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
