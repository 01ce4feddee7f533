//! Helpers for inspecting untyped JSON records.
//!
//! Checks run on raw objects rather than typed records so that a missing key
//! and a null value stay distinguishable.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type Record = Map<String, Value>;

/// Truthiness of a JSON value: null, `""`, `false`, `0`, `[]` and `{}` are
/// all "empty".
pub fn has_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Non-empty string content of `key`, if any.
pub fn text<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Human rendering of a value in a message: strings bare, the rest as JSON,
/// a missing key as `null`.
pub fn render(value: Option<&Value>) -> String {
    match value {
        None => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Record label: the identifying key's text, or a positional fallback.
pub fn label(record: &Record, key: &str, fallback: impl FnOnce() -> String) -> String {
    text(record, key).map(str::to_string).unwrap_or_else(fallback)
}

/// Sorted set of values that occur more than once.
pub fn duplicates<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(value, _)| value.to_string())
        .collect()
}
