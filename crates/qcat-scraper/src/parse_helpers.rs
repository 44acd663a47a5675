//! Typed, total accessors over an untyped [`RawRecord`].
//!
//! Every accessor returns a value for every input: absent keys, `null`,
//! and values of the wrong JSON type all fall back to a fixed default.
//! Numeric accessors accept numbers and numeric strings (`"12.50"`), since
//! both shapes occur in product payloads.

use qcat_core::SENTINEL;
use serde_json::Value;

use crate::types::RawRecord;

/// Present, non-null value for `key`.
fn present<'a>(record: &'a RawRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// String field; scalars are rendered, everything else becomes [`SENTINEL`].
pub(crate) fn text_field(record: &RawRecord, key: &str) -> String {
    match present(record, key) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => SENTINEL.to_owned(),
    }
}

/// Non-negative amount (prices). Negative or unparseable values become `0.0`.
pub(crate) fn amount_field(record: &RawRecord, key: &str) -> f64 {
    present(record, key)
        .and_then(as_f64)
        .filter(|v| *v >= 0.0)
        .unwrap_or(0.0)
}

/// Finite float, `0.0` when absent or unparseable.
pub(crate) fn number_field(record: &RawRecord, key: &str) -> f64 {
    present(record, key).and_then(as_f64).unwrap_or(0.0)
}

/// Non-negative count. Fractions are truncated and values beyond `u32::MAX`
/// saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn count_field(record: &RawRecord, key: &str) -> u32 {
    let Some(value) = present(record, key) else {
        return 0;
    };
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    match as_f64(value) {
        Some(v) if v >= 0.0 => v.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Boolean flag; accepts booleans, `0`/`1`, and `"true"`/`"false"`.
pub(crate) fn flag_field(record: &RawRecord, key: &str, default: bool) -> bool {
    match present(record, key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(default, |v| v != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Tag list joined with `", "` in listing order. A plain string is kept
/// as-is; anything else yields an empty string.
pub(crate) fn tags_field(record: &RawRecord, key: &str) -> String {
    match present(record, key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(_) | Value::Bool(_) => Some(item.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}
