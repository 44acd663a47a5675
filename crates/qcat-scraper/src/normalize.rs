//! Normalization from raw product records to [`qcat_core::CanonicalProduct`].
//!
//! Each output field has exactly one source key and one default rule, so
//! normalization is total: any JSON object, including `{}`, produces a fully
//! populated product. Field-level coercion lives in [`crate::parse_helpers`].

use chrono::{Local, NaiveDateTime, Timelike};
use qcat_core::CanonicalProduct;

use crate::parse_helpers::{
    amount_field, count_field, flag_field, number_field, tags_field, text_field,
};
use crate::types::RawRecord;

/// Normalizes a raw product record, stamping it with the current local time.
#[must_use]
pub fn normalize_product(record: &RawRecord) -> CanonicalProduct {
    normalize_product_at(record, now_to_second())
}

/// Normalizes a raw product record with an explicit `scraped_at` timestamp.
#[must_use]
pub fn normalize_product_at(record: &RawRecord, scraped_at: NaiveDateTime) -> CanonicalProduct {
    let price = amount_field(record, "price");
    let mrp = amount_field(record, "mrp");

    CanonicalProduct {
        product_id: text_field(record, "id"),
        name: text_field(record, "name"),
        brand: text_field(record, "brand"),
        category: text_field(record, "category"),
        subcategory: text_field(record, "subcategory"),
        description: text_field(record, "description"),
        weight: text_field(record, "weight"),
        unit: text_field(record, "unit"),
        quantity: text_field(record, "quantity"),
        price,
        mrp,
        discount_percent: discount_percent(price, mrp),
        availability: flag_field(record, "in_stock", true),
        rating: number_field(record, "rating"),
        review_count: count_field(record, "review_count"),
        tags: tags_field(record, "tags"),
        image_url: text_field(record, "image_url"),
        thumbnail_url: text_field(record, "thumbnail_url"),
        scraped_at,
    }
}

/// `round(((mrp - price) / mrp) * 100, 2)` when `mrp > 0`, else `0.0`.
///
/// A price above MRP yields a negative discount; it is reported as-is.
#[must_use]
pub fn discount_percent(price: f64, mrp: f64) -> f64 {
    if mrp > 0.0 {
        round2((mrp - price) / mrp * 100.0)
    } else {
        0.0
    }
}

/// Rounds to two decimal places.
///
/// Rounds the exact binary value, so a tie such as `90.625` goes to the even
/// digit (`90.62`) and `2.675`, stored just below the tie, goes down.
#[must_use]
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse::<f64>().unwrap_or(value)
}

fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
