use chrono::NaiveDate;
use qcat_core::SENTINEL;
use serde_json::{json, Value};

use super::*;

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|d| d.and_hms_opt(10, 20, 30))
        .expect("valid timestamp")
}

fn full_record() -> RawRecord {
    record(json!({
        "id": "prod-991",
        "name": "Amul Taaza Toned Milk",
        "brand": "Amul",
        "price": 27,
        "mrp": 30,
        "weight": "500",
        "unit": "ml",
        "quantity": "1",
        "in_stock": true,
        "image_url": "https://cdn.example.com/prod-991.jpg",
        "thumbnail_url": "https://cdn.example.com/prod-991_t.jpg",
        "category": "Dairy",
        "subcategory": "Milk",
        "description": "Toned milk pouch",
        "rating": 4.4,
        "review_count": 1280,
        "tags": ["bestseller", "daily"]
    }))
}

// -----------------------------------------------------------------------
// normalize_product_at
// -----------------------------------------------------------------------

#[test]
fn maps_every_field_from_a_complete_record() {
    let p = normalize_product_at(&full_record(), fixed_time());
    assert_eq!(p.product_id, "prod-991");
    assert_eq!(p.name, "Amul Taaza Toned Milk");
    assert_eq!(p.brand, "Amul");
    assert_eq!(p.category, "Dairy");
    assert_eq!(p.subcategory, "Milk");
    assert_eq!(p.description, "Toned milk pouch");
    assert_eq!(p.weight, "500");
    assert_eq!(p.unit, "ml");
    assert_eq!(p.quantity, "1");
    assert!((p.price - 27.0).abs() < f64::EPSILON);
    assert!((p.mrp - 30.0).abs() < f64::EPSILON);
    assert!((p.discount_percent - 10.0).abs() < f64::EPSILON);
    assert!(p.availability);
    assert!((p.rating - 4.4).abs() < f64::EPSILON);
    assert_eq!(p.review_count, 1280);
    assert_eq!(p.tags, "bestseller, daily");
    assert_eq!(p.image_url, "https://cdn.example.com/prod-991.jpg");
    assert_eq!(p.thumbnail_url, "https://cdn.example.com/prod-991_t.jpg");
    assert_eq!(p.scraped_at, fixed_time());
}

#[test]
fn empty_record_gets_every_default() {
    let p = normalize_product_at(&RawRecord::new(), fixed_time());
    for text in [
        &p.product_id,
        &p.name,
        &p.brand,
        &p.category,
        &p.subcategory,
        &p.description,
        &p.weight,
        &p.unit,
        &p.quantity,
        &p.image_url,
        &p.thumbnail_url,
    ] {
        assert_eq!(text, SENTINEL);
    }
    assert_eq!(p.price, 0.0);
    assert_eq!(p.mrp, 0.0);
    assert_eq!(p.discount_percent, 0.0);
    assert!(p.availability, "availability defaults to true");
    assert_eq!(p.rating, 0.0);
    assert_eq!(p.review_count, 0);
    assert_eq!(p.tags, "");
}

#[test]
fn null_values_are_treated_as_absent() {
    let r = record(json!({"name": null, "price": null, "in_stock": null, "tags": null}));
    let p = normalize_product_at(&r, fixed_time());
    assert_eq!(p.name, SENTINEL);
    assert_eq!(p.price, 0.0);
    assert!(p.availability);
    assert_eq!(p.tags, "");
}

#[test]
fn numeric_id_is_rendered_as_string() {
    let r = record(json!({"id": 5_512_003}));
    let p = normalize_product_at(&r, fixed_time());
    assert_eq!(p.product_id, "5512003");
}

#[test]
fn out_of_stock_flag_is_respected() {
    let r = record(json!({"in_stock": false}));
    assert!(!normalize_product_at(&r, fixed_time()).availability);
}

#[test]
fn string_prices_are_parsed() {
    let r = record(json!({"price": "99.50", "mrp": "120"}));
    let p = normalize_product_at(&r, fixed_time());
    assert!((p.price - 99.5).abs() < f64::EPSILON);
    assert!((p.mrp - 120.0).abs() < f64::EPSILON);
    assert!((p.discount_percent - 17.08).abs() < 1e-9);
}

#[test]
fn negative_price_is_clamped_to_zero() {
    let r = record(json!({"price": -10, "mrp": 50}));
    let p = normalize_product_at(&r, fixed_time());
    assert_eq!(p.price, 0.0);
    assert!((p.discount_percent - 100.0).abs() < f64::EPSILON);
}

#[test]
fn normalize_product_stamps_second_precision() {
    let p = normalize_product(&full_record());
    assert_eq!(p.scraped_at.nanosecond(), 0);
}

// -----------------------------------------------------------------------
// discount_percent
// -----------------------------------------------------------------------

#[test]
fn discount_is_zero_without_mrp() {
    assert_eq!(discount_percent(50.0, 0.0), 0.0);
    assert_eq!(discount_percent(0.0, 0.0), 0.0);
    assert_eq!(discount_percent(10.0, -5.0), 0.0);
}

#[test]
fn discount_rounds_to_two_places() {
    // (3 - 2) / 3 * 100 = 33.333...
    assert!((discount_percent(2.0, 3.0) - 33.33).abs() < 1e-9);
    // (3 - 1) / 3 * 100 = 66.666...
    assert!((discount_percent(1.0, 3.0) - 66.67).abs() < 1e-9);
}

#[test]
fn discount_ties_round_to_even_digit() {
    // 29 / 32 * 100 = 90.625 and 25 / 32 * 100 = 78.125, both exact in binary.
    assert!((discount_percent(3.0, 32.0) - 90.62).abs() < 1e-9);
    assert!((discount_percent(7.0, 32.0) - 78.12).abs() < 1e-9);
    // 27 / 32 * 100 = 84.375
    assert!((discount_percent(5.0, 32.0) - 84.38).abs() < 1e-9);
}

#[test]
fn discount_fixed_values() {
    assert!((discount_percent(27.0, 30.0) - 10.0).abs() < 1e-9);
    assert!((discount_percent(45.0, 60.0) - 25.0).abs() < 1e-9);
    assert!((discount_percent(0.0, 49.99) - 100.0).abs() < 1e-9);
    assert!((discount_percent(6.99, 7.0) - 0.14).abs() < 1e-9);
}

#[test]
fn price_above_mrp_gives_negative_discount() {
    assert!((discount_percent(120.0, 100.0) + 20.0).abs() < f64::EPSILON);
}

#[test]
fn round2_rounds_exact_binary_value() {
    assert!((round2(90.625) - 90.62).abs() < 1e-9);
    assert!((round2(0.125) - 0.12).abs() < 1e-9);
    assert!((round2(0.375) - 0.38).abs() < 1e-9);
    assert!((round2(2.675) - 2.67).abs() < 1e-9);
    assert!((round2(2.344) - 2.34).abs() < 1e-9);
    assert!((round2(-2.346) + 2.35).abs() < 1e-9);
    assert!((round2(17.0) - 17.0).abs() < f64::EPSILON);
}
